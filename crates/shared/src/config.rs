use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Which backend holds the list documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// aws-sdk-s3 against the configured bucket.
    S3,
    /// Process-local map, for development and tests.
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub store_backend: StoreBackend,
    pub s3_bucket: String,
    pub broadcast_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_backend = match env::var("TODO_STORE").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            Ok("s3") | Err(_) => StoreBackend::S3,
            Ok(other) => {
                return Err(ConfigError::Invalid {
                    name: "TODO_STORE",
                    value: other.to_string(),
                })
            }
        };

        let broadcast_capacity = match env::var("WS_BROADCAST_CAPACITY") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "WS_BROADCAST_CAPACITY",
                value: raw.clone(),
            })?,
            Err(_) => 256,
        };

        Ok(Config {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3030".to_string()),
            store_backend,
            s3_bucket: env::var("TODO_BUCKET").unwrap_or_else(|_| "todo-list-dev".to_string()),
            broadcast_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        // Relies on the test process not setting these variables.
        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3030");
        assert_eq!(config.store_backend, StoreBackend::S3);
        assert_eq!(config.s3_bucket, "todo-list-dev");
        assert_eq!(config.broadcast_capacity, 256);
    }
}
