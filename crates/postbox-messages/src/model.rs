use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A submitted message.
///
/// `id` and `created_at` are assigned by the database when the row is
/// inserted; a `Message` is never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Row ID, unique and increasing in insertion order.
    pub id: i64,
    /// Text as submitted.
    pub text: String,
    /// Insertion time (UTC, millisecond precision).
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message{{id={}, message='{}', timestamp={}}}",
            self.id,
            self.text,
            self.created_at.format("%Y-%m-%d %H:%M:%S%.3f")
        )
    }
}
