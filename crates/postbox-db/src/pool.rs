//! Connection provider: pool creation and connection settings.

use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use thiserror::Error;

/// Where the database lives and how connections to it behave.
///
/// Constructed once at startup and handed to [`create_pool`]; nothing in this
/// crate reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    /// Database host. Reported in diagnostics only; the embedded engine
    /// opens a local file.
    pub host: String,

    /// Database port. Reported in diagnostics only.
    pub port: u16,

    /// Database name. Resolved to a file by [`DbSettings::database_path`].
    pub name: String,

    /// Database user. Reported in diagnostics only.
    pub user: String,

    /// Database password. Never logged.
    pub password: String,

    /// Maximum number of pooled connections.
    pub pool_max_size: u32,

    /// How long an acquisition may wait before failing, in milliseconds.
    pub connection_timeout_ms: u64,

    /// Busy timeout for SQLite connections, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            name: "webapp_db".to_string(),
            user: "webapp_user".to_string(),
            password: "changeme".to_string(),
            pool_max_size: 10,
            connection_timeout_ms: 5_000,
            busy_timeout_ms: 5_000,
        }
    }
}

impl DbSettings {
    /// Resolves the database name to the file SQLite opens.
    ///
    /// A bare name gets a `.db` extension; names that already carry an
    /// extension are used as-is.
    pub fn database_path(&self) -> String {
        if Path::new(&self.name).extension().is_some() {
            self.name.clone()
        } else {
            format!("{}.db", self.name)
        }
    }

    /// Connection target for diagnostics. The password is left out.
    pub fn connection_string(&self) -> String {
        format!(
            "sqlite://{}@{}:{}/{}",
            self.user,
            self.host,
            self.port,
            self.database_path()
        )
    }
}

/// A type alias for the SQLite connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// A connection checked out of the pool. Returned to the pool when dropped.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// SQLite name for a private in-memory database.
const IN_MEMORY_NAME: &str = ":memory:";

/// Errors that can occur when creating the database pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool settings were rejected.
    #[error("invalid connection pool settings: {0}")]
    InvalidSettings(String),
}

/// Creates a bounded SQLite connection pool.
///
/// The pool is built lazily: no connection is opened here, so an unreachable
/// database does not stop the caller from starting. Each connection is
/// opened on first acquisition and initialised with WAL mode and the
/// configured busy timeout.
///
/// # Errors
///
/// Returns `PoolError::InvalidSettings` if `pool_max_size` or
/// `connection_timeout_ms` is zero, or if the name is `:memory:`. Every
/// pooled connection would get its own empty in-memory database, so the
/// schema and rows would not be shared between requests.
pub fn create_pool(settings: &DbSettings) -> Result<DbPool, PoolError> {
    if settings.name == IN_MEMORY_NAME {
        return Err(PoolError::InvalidSettings(
            "in-memory databases cannot be pooled; name a database file".to_string(),
        ));
    }
    if settings.pool_max_size == 0 {
        return Err(PoolError::InvalidSettings(
            "pool_max_size must be at least 1".to_string(),
        ));
    }
    if settings.connection_timeout_ms == 0 {
        return Err(PoolError::InvalidSettings(
            "connection_timeout_ms must be at least 1".to_string(),
        ));
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;

    let busy_timeout_ms = settings.busy_timeout_ms;
    let manager = SqliteConnectionManager::file(settings.database_path())
        .with_flags(flags)
        .with_init(move |conn| {
            let journal_mode: String =
                conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
            if journal_mode != "wal" {
                return Err(rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
                    Some(format!(
                        "failed to set WAL journal mode, got: {}",
                        journal_mode
                    )),
                ));
            }
            conn.execute_batch(&format!("PRAGMA busy_timeout = {};", busy_timeout_ms))
        });

    let pool = Pool::builder()
        .max_size(settings.pool_max_size)
        .min_idle(Some(0))
        .connection_timeout(Duration::from_millis(settings.connection_timeout_ms))
        .build_unchecked(manager);

    tracing::debug!(
        db = %settings.connection_string(),
        max_size = settings.pool_max_size,
        "created database connection pool"
    );

    Ok(pool)
}
