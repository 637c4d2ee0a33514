//! Server configuration loading from file and environment variables.

use postbox_db::DbSettings;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database configuration.
///
/// Every field has a development default so the server runs with no
/// configuration at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub pool_max_size: u32,
    pub connection_timeout_ms: u64,
    pub busy_timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "postbox_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DbSettings::default().into()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl From<DbSettings> for DatabaseConfig {
    fn from(settings: DbSettings) -> Self {
        Self {
            host: settings.host,
            port: settings.port,
            name: settings.name,
            user: settings.user,
            password: settings.password,
            pool_max_size: settings.pool_max_size,
            connection_timeout_ms: settings.connection_timeout_ms,
            busy_timeout_ms: settings.busy_timeout_ms,
        }
    }
}

impl DatabaseConfig {
    /// Settings for the connection provider.
    pub fn db_settings(&self) -> DbSettings {
        DbSettings {
            host: self.host.clone(),
            port: self.port,
            name: self.name.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            pool_max_size: self.pool_max_size,
            connection_timeout_ms: self.connection_timeout_ms,
            busy_timeout_ms: self.busy_timeout_ms,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults, then
/// applies overrides from the process environment.
///
/// See [`apply_env_overrides`] for the recognised variables.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = read_config_file(path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Reads configuration from a TOML file without consulting the environment.
///
/// A missing file, or no path at all, yields the defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn read_config_file(path: Option<&str>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };
    Ok(config)
}

/// Applies environment overrides using `lookup` to read variables.
///
/// - `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD` override the
///   matching `database` fields
/// - `POSTBOX_HOST` overrides `server.host`
/// - `POSTBOX_PORT` overrides `server.port`
/// - `POSTBOX_LOG_LEVEL` overrides `logging.level`
/// - `POSTBOX_LOG_JSON` overrides `logging.json` (set to "true" or "1" to enable)
///
/// Values that do not parse are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("DB_HOST") {
        config.database.host = host;
    }
    if let Some(port) = lookup("DB_PORT") {
        match port.parse() {
            Ok(parsed) => config.database.port = parsed,
            Err(_) => tracing::warn!(value = %port, "ignoring unparseable DB_PORT"),
        }
    }
    if let Some(name) = lookup("DB_NAME") {
        config.database.name = name;
    }
    if let Some(user) = lookup("DB_USER") {
        config.database.user = user;
    }
    if let Some(password) = lookup("DB_PASSWORD") {
        config.database.password = password;
    }

    if let Some(host) = lookup("POSTBOX_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = lookup("POSTBOX_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = lookup("POSTBOX_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("POSTBOX_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}
