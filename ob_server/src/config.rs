//! Server configuration management.
//!
//! Consolidates environment variable reads and provides validated
//! configuration.

use olympic_bracket::db::DatabaseConfig;
use std::net::SocketAddr;
use thiserror::Error;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid bind address: {0}")]
    InvalidBind(String),

    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

impl ServerConfig {
    /// Load configuration from environment variables, with optional CLI
    /// overrides taking precedence.
    ///
    /// Reads `SERVER_BIND` (default `127.0.0.1:8080`), `DATABASE_URL`
    /// (required), and the `DB_*` pool settings.
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        database_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => {
                let raw = std::env::var("SERVER_BIND")
                    .unwrap_or_else(|_| "127.0.0.1:8080".to_string());
                raw.parse().map_err(|_| ConfigError::InvalidBind(raw))?
            }
        };

        let database_url = database_url_override
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .ok_or(ConfigError::MissingVar("DATABASE_URL"))?;

        let database = DatabaseConfig {
            database_url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            min_connections: env_or("DB_MIN_CONNECTIONS", 5),
            connection_timeout_secs: env_or("DB_CONNECTION_TIMEOUT", 10),
            idle_timeout_secs: env_or("DB_IDLE_TIMEOUT", 600),
            max_lifetime_secs: env_or("DB_MAX_LIFETIME", 1800),
        };

        Ok(Self { bind, database })
    }
}

fn env_or<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_take_precedence() {
        let bind: SocketAddr = "0.0.0.0:9000".parse().unwrap();
        let config = ServerConfig::from_env(
            Some(bind),
            Some("postgres://postgres@localhost/bracket_test".to_string()),
        )
        .unwrap();

        assert_eq!(config.bind, bind);
        assert_eq!(
            config.database.database_url,
            "postgres://postgres@localhost/bracket_test"
        );
    }

    #[test]
    fn env_or_falls_back_to_default() {
        let value: u32 = env_or("OB_SERVER_UNSET_TEST_VAR", 7);
        assert_eq!(value, 7);
    }
}
