//! The message store: pooled access to the `messages` table.
//!
//! Every operation checks a connection out of the pool, runs one statement,
//! and drops the connection before returning.
//!
//! Two surfaces are exposed. The `try_*` methods return the full
//! [`MessageError`]. The plain methods (`insert`, `list_all`, `count`,
//! `delete_by_id`) log the error and collapse it to `false`, an empty list,
//! or `0`, so a database outage is never visible to the caller as an error.
//! The list page therefore shows an empty list when the database is down.

use postbox_db::{DbPool, PooledConnection};

use crate::error::MessageError;
use crate::model::Message;
use crate::queries::{count_messages, delete_message, insert_message, list_messages};

/// Data access for submitted messages.
#[derive(Clone)]
pub struct MessageStore {
    pool: DbPool,
}

impl MessageStore {
    /// Creates a store over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Checks a connection out of the pool.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::Connection` when the database is unreachable
    /// or no connection frees up within the pool's timeout.
    pub fn acquire(&self) -> Result<PooledConnection, MessageError> {
        Ok(self.pool.get()?)
    }

    /// Stores `text` and returns the saved message.
    pub fn try_insert(&self, text: &str) -> Result<Message, MessageError> {
        let conn = self.acquire()?;
        insert_message(&conn, text)
    }

    /// Returns all messages, newest first.
    pub fn try_list_all(&self) -> Result<Vec<Message>, MessageError> {
        let conn = self.acquire()?;
        list_messages(&conn)
    }

    /// Returns the number of stored messages.
    pub fn try_count(&self) -> Result<i64, MessageError> {
        let conn = self.acquire()?;
        count_messages(&conn)
    }

    /// Deletes a message. `Ok(true)` iff exactly one row was removed.
    pub fn try_delete_by_id(&self, id: i64) -> Result<bool, MessageError> {
        let conn = self.acquire()?;
        Ok(delete_message(&conn, id)? == 1)
    }

    /// Stores `text`. Returns `false` on any failure, after logging it.
    pub fn insert(&self, text: &str) -> bool {
        match self.try_insert(text) {
            Ok(message) => {
                tracing::debug!(id = message.id, "inserted message");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "error inserting message");
                false
            }
        }
    }

    /// Returns all messages, newest first, or an empty list on failure.
    pub fn list_all(&self) -> Vec<Message> {
        self.try_list_all().unwrap_or_else(|e| {
            tracing::error!(error = %e, "error retrieving messages");
            Vec::new()
        })
    }

    /// Returns the number of stored messages, or `0` on failure.
    pub fn count(&self) -> i64 {
        self.try_count().unwrap_or_else(|e| {
            tracing::error!(error = %e, "error getting message count");
            0
        })
    }

    /// Deletes a message. Returns `true` iff exactly one row was removed;
    /// failures are logged and reported as `false`.
    ///
    /// No HTTP route calls this yet.
    pub fn delete_by_id(&self, id: i64) -> bool {
        match self.try_delete_by_id(id) {
            Ok(removed) => removed,
            Err(e) => {
                tracing::error!(error = %e, id, "error deleting message");
                false
            }
        }
    }
}
