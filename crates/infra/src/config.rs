//! Configuration loading and representation.
//!
//! Everything comes from the process environment at startup:
//!
//! | Variable | Default |
//! |---|---|
//! | `LEARNHUB_BIND_ADDR` | `0.0.0.0:8080` |
//! | `LEARNHUB_SESSION_SECRET` | insecure dev secret (logged as a warning) |
//! | `DATABASE_URL` | unset → in-memory gateway |
//! | `LEARNHUB_DB_MAX_CONNECTIONS` | `5` |
//! | `LEARNHUB_LOG_FORMAT` | `json` |

use std::net::SocketAddr;

use thiserror::Error;

use learnhub_observability::LogFormat;

const DEV_SESSION_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub session_secret: String,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// True when no session secret was configured.
    pub fn uses_dev_secret(&self) -> bool {
        self.session_secret == DEV_SESSION_SECRET
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("LEARNHUB_BIND_ADDR") {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::invalid("LEARNHUB_BIND_ADDR", e.to_string()))?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let session_secret =
            get("LEARNHUB_SESSION_SECRET").unwrap_or_else(|| DEV_SESSION_SECRET.to_string());

        let db_max_connections = match get("LEARNHUB_DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) => return Err(ConfigError::invalid("LEARNHUB_DB_MAX_CONNECTIONS", "must be at least 1")),
                Ok(n) => n,
                Err(e) => return Err(ConfigError::invalid("LEARNHUB_DB_MAX_CONNECTIONS", e.to_string())),
            },
            None => 5,
        };

        let log_format = match get("LEARNHUB_LOG_FORMAT") {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid("LEARNHUB_LOG_FORMAT", e.to_string()))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            session_secret,
            database_url: get("DATABASE_URL"),
            db_max_connections,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert!(cfg.uses_dev_secret());
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.db_max_connections, 5);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config(&[
            ("LEARNHUB_BIND_ADDR", "127.0.0.1:3000"),
            ("LEARNHUB_SESSION_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/learnhub"),
            ("LEARNHUB_DB_MAX_CONNECTIONS", "12"),
            ("LEARNHUB_LOG_FORMAT", "pretty"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(cfg.session_secret, "s3cret");
        assert!(!cfg.uses_dev_secret());
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/learnhub"));
        assert_eq!(cfg.db_max_connections, 12);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn empty_database_url_means_in_memory() {
        let cfg = config(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(cfg.database_url, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config(&[("LEARNHUB_BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { key: "LEARNHUB_BIND_ADDR", .. })
        ));
        assert!(matches!(
            config(&[("LEARNHUB_DB_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::Invalid { key: "LEARNHUB_DB_MAX_CONNECTIONS", .. })
        ));
        assert!(matches!(
            config(&[("LEARNHUB_LOG_FORMAT", "xml")]),
            Err(ConfigError::Invalid { key: "LEARNHUB_LOG_FORMAT", .. })
        ));
    }
}
