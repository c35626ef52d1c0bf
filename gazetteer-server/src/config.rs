//! Server configuration.
//!
//! Every setting has a default and can be overridden by an environment
//! variable:
//!
//! - `GAZETTEER_HOST`: bind address (default `127.0.0.1`)
//! - `GAZETTEER_PORT`: bind port (default `3000`)
//! - `GAZETTEER_DATABASE_URL`: sqlx SQLite URL (default `sqlite://gazetteer.db`)
//! - `GAZETTEER_MAX_CONNECTIONS`: pool size (default `8`)
//! - `GAZETTEER_SOURCE`: tab-separated dataset imported on first start
//!   (default `RU.txt`)
//! - `GAZETTEER_MAX_PAGE_LIMIT`: largest accepted `limit` on `/items`
//!   (default `1000`)

use std::path::PathBuf;

/// Error raised when an environment variable is set but unusable.
#[derive(Debug, thiserror::Error)]
#[error("invalid value for {key}: {message}")]
pub struct ConfigError {
    key: &'static str,
    message: String,
}

/// Configuration for the gazetteer server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// SQLite database URL.
    pub database_url: String,

    /// Maximum pooled database connections.
    pub max_connections: u32,

    /// Dataset imported when the database has no table yet.
    pub source_path: PathBuf,

    /// Largest page size `/items` accepts.
    pub max_page_limit: i64,
}

impl ServerConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env_or("GAZETTEER_HOST", defaults.host)?,
            port: env_or("GAZETTEER_PORT", defaults.port)?,
            database_url: env_or("GAZETTEER_DATABASE_URL", defaults.database_url)?,
            max_connections: env_or("GAZETTEER_MAX_CONNECTIONS", defaults.max_connections)?,
            source_path: env_or("GAZETTEER_SOURCE", defaults.source_path)?,
            max_page_limit: env_or("GAZETTEER_MAX_PAGE_LIMIT", defaults.max_page_limit)?,
        })
    }

    /// `host:port`, as passed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Override the dataset path.
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Override the largest accepted page size.
    pub fn with_max_page_limit(mut self, limit: i64) -> Self {
        self.max_page_limit = limit;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "sqlite://gazetteer.db".to_string(),
            max_connections: 8,
            source_path: PathBuf::from("RU.txt"),
            max_page_limit: 1000,
        }
    }
}

/// Read `key` from the environment, or return `default` when unset.
fn env_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError {
        key,
        message: format!("{raw:?}: {e}"),
    })
}
