//! Message persistence for postbox.
//!
//! A [`Message`] is a piece of submitted text plus the id and timestamp the
//! database assigns when it is stored. [`MessageStore`] mediates every read
//! and write of the `messages` table:
//!
//! | Operation | Result | On failure |
//! |-----------|--------|------------|
//! | [`MessageStore::insert`] | `bool` | `false` |
//! | [`MessageStore::list_all`] | `Vec<Message>`, newest first | empty |
//! | [`MessageStore::count`] | `i64` | `0` |
//! | [`MessageStore::delete_by_id`] | `bool` | `false` |
//!
//! Failures are logged through `tracing` before being collapsed. The
//! `try_*` counterparts return [`MessageError`] for callers that need to
//! tell an empty table from an unreachable one.

mod error;
mod model;
mod queries;
mod store;

pub use error::MessageError;
pub use model::Message;
pub use queries::{count_messages, delete_message, insert_message, list_messages};
pub use store::MessageStore;
