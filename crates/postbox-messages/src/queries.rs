//! Statements over the `messages` table.
//!
//! Each function runs a single auto-committed statement on a borrowed
//! connection and reports failures as [`MessageError::Query`].

use rusqlite::{Connection, Row};

use crate::error::MessageError;
use crate::model::Message;

/// Inserts a message and returns the stored row.
///
/// Only the text is bound; `id` and `timestamp` come from the database.
pub fn insert_message(conn: &Connection, text: &str) -> Result<Message, MessageError> {
    let message = conn.query_row(
        "INSERT INTO messages (message) VALUES (?1)
         RETURNING id, message, timestamp",
        [text],
        map_row_to_message,
    )?;
    Ok(message)
}

/// Lists every message, newest first.
///
/// Messages sharing a timestamp are ordered by descending id.
pub fn list_messages(conn: &Connection) -> Result<Vec<Message>, MessageError> {
    let mut stmt = conn.prepare(
        "SELECT id, message, timestamp
         FROM messages
         ORDER BY timestamp DESC, id DESC",
    )?;

    let rows = stmt.query_map([], map_row_to_message)?;
    let mut messages = Vec::new();
    for row in rows {
        messages.push(row?);
    }
    Ok(messages)
}

/// Counts stored messages.
pub fn count_messages(conn: &Connection) -> Result<i64, MessageError> {
    let count = conn.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
    Ok(count)
}

/// Deletes the message with the given id. Returns the number of rows removed.
pub fn delete_message(conn: &Connection, id: i64) -> Result<usize, MessageError> {
    let count = conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
    Ok(count)
}

fn map_row_to_message(row: &Row) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        text: row.get(1)?,
        created_at: row.get(2)?,
    })
}
