//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MENU_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`; not needed when `MENU_STORE=memory`)
//!
//! ## Optional
//! - `MENU_STORE` - Store backend: `postgres` (default) or `memory`
//! - `MENU_API_HOST` - Bind address (default: 127.0.0.1)
//! - `MENU_API_PORT` - Listen port (default: 5000)
//! - `MENU_CORS_ORIGINS` - Comma-separated allowed origins (default: any)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which [`crate::db::MenuItemStore`] backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Store backend
    pub store: StoreBackend,
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<HeaderValue>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry trace sample rate
    pub sentry_traces_sample_rate: f32,
}

impl ApiConfig {
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

        let store = get_env_or_default("MENU_STORE", "postgres")
            .parse::<StoreBackend>()
            .map_err(|e| ConfigError::InvalidEnvVar("MENU_STORE".to_string(), e))?;
        let database_url = match store {
            StoreBackend::Postgres => Some(get_database_url("MENU_DATABASE_URL")?),
            StoreBackend::Memory => None,
        };
        let host = get_env_or_default("MENU_API_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MENU_API_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("MENU_API_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MENU_API_PORT".to_string(), e.to_string()))?;
        let cors_origins =
            parse_cors_origins(&get_optional_env("MENU_CORS_ORIGINS").unwrap_or_default())?;

        Ok(Self {
            store,
            database_url,
            host,
            port,
            cors_origins,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Configuration for an in-memory API on an ephemeral port.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: StoreBackend::Memory,
            database_url: None,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            cors_origins: Vec::new(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
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
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a sample rate in `0.0..=1.0`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .trim()
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Parse a comma-separated origin list.
fn parse_cors_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin.trim_end_matches('/')).map_err(|e| {
                ConfigError::InvalidEnvVar("MENU_CORS_ORIGINS".to_string(), e.to_string())
            })
        })
        .collect()
}
