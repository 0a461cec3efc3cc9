//! Web client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MENU_API_URL` - Base URL of the menu API (default: `http://localhost:5000/api`)
//! - `MENU_WEB_HOST` - Bind address (default: 127.0.0.1)
//! - `MENU_WEB_PORT` - Listen port (default: 3000)
//! - `MENU_WEB_BASE_URL` - Public URL; `https` enables secure cookies
//!   (default: `http://localhost:3000`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Web client configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Menu API base URL, including the `/api` prefix
    pub api_url: Url,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of this site
    pub base_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default(
            "MENU_API_URL",
            "http://localhost:5000/api",
        ))?;
        let host = get_env_or_default("MENU_WEB_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MENU_WEB_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("MENU_WEB_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MENU_WEB_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            api_url,
            host,
            port,
            base_url: get_env_or_default("MENU_WEB_BASE_URL", "http://localhost:3000"),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Parse the API URL, requiring an http(s) scheme.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("MENU_API_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "MENU_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url() {
        let url = parse_api_url(" http://localhost:5000/api ").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api");

        assert!(parse_api_url("localhost:5000").is_err());
        assert!(parse_api_url("ftp://menu.example.com/api").is_err());
    }

    #[test]
    fn test_is_secure() {
        let mut config = WebConfig {
            api_url: Url::parse("http://localhost:5000/api").unwrap(),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            sentry_dsn: None,
            sentry_environment: None,
        };
        assert!(!config.is_secure());

        config.base_url = "https://menu.example.com".to_string();
        assert!(config.is_secure());
        assert_eq!(config.socket_addr().port(), 3000);
    }
}
