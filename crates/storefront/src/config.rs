//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CATALOG_URL` - Product listing endpoint (default: <https://fakestoreapi.com/products>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (e.g. production)
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Default product listing endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Remote catalog configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Remote catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Absolute `http`/`https` URL answering `GET` with a JSON product array
    pub url: Url,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or_default(&lookup, "STOREFRONT_HOST", "127.0.0.1", |v| {
            v.parse::<IpAddr>().map_err(|e| e.to_string())
        })?;
        let port = parse_or_default(&lookup, "STOREFRONT_PORT", "3000", |v| {
            v.parse::<u16>().map_err(|e| e.to_string())
        })?;
        let catalog = CatalogConfig {
            url: parse_or_default(&lookup, "CATALOG_URL", DEFAULT_CATALOG_URL, parse_http_url)?,
        };
        let sentry_sample_rate =
            parse_or_default(&lookup, "SENTRY_SAMPLE_RATE", "1.0", parse_sample_rate)?;
        let sentry_traces_sample_rate =
            parse_or_default(&lookup, "SENTRY_TRACES_SAMPLE_RATE", "0.0", parse_sample_rate)?;

        Ok(Self {
            host,
            port,
            catalog,
            sentry_dsn: non_empty(&lookup, "SENTRY_DSN"),
            sentry_environment: non_empty(&lookup, "SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
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

/// Get an optional variable, treating an empty value as unset.
fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    let value = non_empty(lookup, key).unwrap_or_else(|| default.to_string());
    parse(value.trim()).map_err(|reason| ConfigError::InvalidEnvVar(key.to_string(), reason))
}

fn parse_http_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}', expected http or https")),
    }
}

fn parse_sample_rate(value: &str) -> Result<f32, String> {
    let rate = value.parse::<f32>().map_err(|e| e.to_string())?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("must be between 0.0 and 1.0 (got {rate})"))
    }
}
