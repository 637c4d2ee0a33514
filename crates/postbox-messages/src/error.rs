//! Error types for message persistence.

/// Errors that can occur while reading or writing messages.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// No connection could be acquired: the database is unreachable or
    /// refused the connection.
    #[error("database connection failed: {0}")]
    Connection(#[from] r2d2::Error),

    /// A statement failed to prepare or execute.
    #[error("database query failed: {0}")]
    Query(#[from] rusqlite::Error),
}
