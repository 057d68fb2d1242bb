//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Store
//! - `STORE_BACKEND` - `postgres` (default) or `memory`
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string, required for
//!   the postgres backend (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 5000)
//! - `STOREFRONT_BASE_URL` - Public API base URL (default: `http://localhost:5000`)
//! - `CORS_ALLOWED_ORIGINS` - Comma-separated origins; unset allows any origin
//! - `LOG_FORMAT` - `text` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where products and cart items are persisted.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// `PostgreSQL` via sqlx. The URL contains a password.
    Postgres { database_url: SecretString },
    /// Process-local store; contents are lost on restart.
    Memory,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Persistence backend
    pub store: StoreBackend,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the API
    pub base_url: Url,
    /// Allowed CORS origins; empty means any origin
    pub cors_allowed_origins: Vec<String>,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match get_env_or_default(&var, "STORE_BACKEND", "postgres").as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: get_database_url(&var, "STOREFRONT_DATABASE_URL")?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "STORE_BACKEND".to_string(),
                    format!("expected 'postgres' or 'memory', got '{other}'"),
                ));
            }
        };

        let host = get_env_or_default(&var, "STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default(&var, "STOREFRONT_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = Url::parse(&get_env_or_default(
            &var,
            "STOREFRONT_BASE_URL",
            "http://localhost:5000",
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string()))?;

        let cors_allowed_origins = parse_origins(
            var("CORS_ALLOWED_ORIGINS").as_deref().unwrap_or_default(),
        )?;

        let log_format = match get_env_or_default(&var, "LOG_FORMAT", "text").as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "LOG_FORMAT".to_string(),
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            store,
            host,
            port,
            base_url,
            cors_allowed_origins,
            log_format,
            sentry_dsn: var("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: var("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url<F>(var: &F, primary_key: &str) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    var(primary_key)
        .or_else(|| var("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default<F>(var: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    var(key).unwrap_or_else(|| default.to_string())
}

/// Parse a comma-separated origin list, requiring each entry to be a URL.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            Url::parse(origin)
                .map(|_| origin.trim_end_matches('/').to_string())
                .map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "CORS_ALLOWED_ORIGINS".to_string(),
                        format!("{origin}: {e}"),
                    )
                })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_memory_store() {
        let config = load(&[("STORE_BACKEND", "memory")]).unwrap();
        assert!(matches!(config.store, StoreBackend::Memory));
        assert_eq!(config.port, 5000);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
        assert_eq!(config.base_url.as_str(), "http://localhost:5000/");
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "STOREFRONT_DATABASE_URL"));
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/shop")]).unwrap();
        match config.store {
            StoreBackend::Postgres { database_url } => {
                assert_eq!(database_url.expose_secret(), "postgres://localhost/shop");
            }
            StoreBackend::Memory => panic!("expected postgres backend"),
        }
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = load(&[("STORE_BACKEND", "mongo")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = load(&[("STORE_BACKEND", "memory"), ("STOREFRONT_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_base_url_override() {
        let config = load(&[
            ("STORE_BACKEND", "memory"),
            ("STOREFRONT_BASE_URL", "https://shop.example.com"),
        ])
        .unwrap();
        assert_eq!(config.base_url.host_str(), Some("shop.example.com"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = load(&[("STORE_BACKEND", "memory"), ("STOREFRONT_BASE_URL", "not a url")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STOREFRONT_BASE_URL"));
    }

    #[test]
    fn test_cors_origins_parsed() {
        let config = load(&[
            ("STORE_BACKEND", "memory"),
            (
                "CORS_ALLOWED_ORIGINS",
                "http://localhost:5173/, https://shop.example.com",
            ),
        ])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:5173", "https://shop.example.com"]
        );
    }

    #[test]
    fn test_cors_origin_must_be_url() {
        let err = load(&[("STORE_BACKEND", "memory"), ("CORS_ALLOWED_ORIGINS", "nope")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_json_log_format() {
        let config = load(&[("STORE_BACKEND", "memory"), ("LOG_FORMAT", "json")]).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = load(&[(
            "STOREFRONT_DATABASE_URL",
            "postgres://shop:hunter2@db/shop",
        )])
        .unwrap();

        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
        assert!(debug_output.contains("REDACTED"));
    }
}
