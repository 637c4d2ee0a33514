//! Database layer for postbox.
//!
//! Provides the SQLite connection pool (via `r2d2`), WAL-mode connection
//! initialisation, and the embedded migrations that create the `messages`
//! table.
//!
//! # Design decisions
//!
//! - **Pool built lazily**: [`create_pool`] never opens a connection, so the
//!   server can start against a database that is not there yet and fail
//!   individual requests instead.
//! - **Scoped acquisition**: callers take a [`PooledConnection`] for one
//!   logical operation and drop it; the guard returns the connection to the
//!   pool on every exit path.
//! - **Embedded migrations**: SQL files are compiled into the binary via
//!   `include_str!`.

mod migrations;
mod pool;
mod schema;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbSettings, PoolError, PooledConnection};
pub use schema::{ensure_schema, SchemaError};
