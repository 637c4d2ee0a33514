//! Startup schema initialisation.

use thiserror::Error;

use crate::migrations::{run_migrations, MigrationError};
use crate::pool::DbPool;

/// Errors that can occur while ensuring the schema exists.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No connection could be acquired.
    #[error("failed to acquire database connection: {0}")]
    Connection(#[from] r2d2::Error),

    /// A migration failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// Ensures the `messages` table exists, applying any pending migrations.
///
/// Safe to call on every start. The connection is returned to the pool
/// before this function returns, on success and on failure.
///
/// # Errors
///
/// Returns `SchemaError::Connection` if the database cannot be reached and
/// `SchemaError::Migration` if a migration fails.
pub fn ensure_schema(pool: &DbPool) -> Result<usize, SchemaError> {
    let conn = pool.get()?;
    let applied = run_migrations(&conn)?;
    if applied > 0 {
        tracing::info!(count = applied, "applied database migrations");
    }
    Ok(applied)
}
