// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::net::SocketAddr;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddress { var: &'static str, value: String },
    #[error("{var} must be a positive integer, got {value}")]
    InvalidPoolSize { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Postgres connection string. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    pub pool_size: u32,
    pub cors_allow_origin: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment, after loading a
    /// `.env` file from the working directory if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let listen_addr = match non_empty("LISTEN_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidAddress {
                var: "LISTEN_ADDR",
                value,
            })?,
            None => SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 0], DEFAULT_PORT)),
        };

        let pool_size = match non_empty("DATABASE_POOL_SIZE") {
            Some(value) => match value.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidPoolSize {
                        var: "DATABASE_POOL_SIZE",
                        value,
                    });
                }
            },
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            listen_addr,
            database_url: non_empty("DATABASE_URL"),
            pool_size,
            cors_allow_origin: non_empty("CORS_ALLOW_ORIGIN"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr, "[::]:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.pool_size, 10);
        assert!(config.database_url.is_none());
        assert!(config.cors_allow_origin.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("LISTEN_ADDR", "127.0.0.1:8080"),
            ("DATABASE_URL", "postgres://localhost/projects"),
            ("DATABASE_POOL_SIZE", "4"),
            ("CORS_ALLOW_ORIGIN", "http://localhost:3000"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/projects")
        );
        assert_eq!(config.pool_size, 4);
        assert_eq!(
            config.cors_allow_origin.as_deref(),
            Some("http://localhost:3000")
        );
    }

    #[test]
    fn test_blank_database_url_means_memory() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("LISTEN_ADDR", "localhost")]),
            Err(ConfigError::InvalidAddress { .. })
        ));
        assert!(matches!(
            config_from(&[("DATABASE_POOL_SIZE", "0")]),
            Err(ConfigError::InvalidPoolSize { .. })
        ));
        assert!(matches!(
            config_from(&[("DATABASE_POOL_SIZE", "many")]),
            Err(ConfigError::InvalidPoolSize { .. })
        ));
    }
}
