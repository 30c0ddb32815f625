//! Runtime configuration, read from environment variables.

use std::net::SocketAddr;

use carrent_observability::LogFormat;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: &'static str, reason: String },
}

/// API process configuration.
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | `CARRENT_BIND_ADDR` | `0.0.0.0:8080` | listen address |
/// | `DATABASE_URL` | unset | Postgres repositories when set, in-memory otherwise |
/// | `CARRENT_DB_MAX_CONNECTIONS` | `5` | Postgres pool size |
/// | `CARRENT_LOG_FORMAT` | `json` | `json` or `pretty` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map instead of the process env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("CARRENT_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: "CARRENT_BIND_ADDR",
                reason: e.to_string(),
            })?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let db_max_connections = match lookup("CARRENT_DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| ConfigError::InvalidEnvValue {
                var: "CARRENT_DB_MAX_CONNECTIONS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let log_format = match lookup("CARRENT_LOG_FORMAT") {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|reason| ConfigError::InvalidEnvValue {
                    var: "CARRENT_LOG_FORMAT",
                    reason,
                })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            database_url,
            db_max_connections,
            log_format,
        })
    }
}
