//! Demo server configuration loaded from environment variables.
//!
//! All configuration is loaded from environment variables with sensible defaults
//! for development. A `.env` file in the working directory is honoured.
//!
//! - `HOST`: Bind host (default: `0.0.0.0`)
//! - `PORT`: Bind port (default: 3000)
//! - `FALLBACK_TO_PEER_ADDR`: Answer with the socket peer address when no
//!   header resolves (default: true)
//! - `METRICS_PORT`: Prometheus listener port, 0 disables (default: 9090)
//!
//! Logging is filtered by `RUST_LOG` (default: `info`), read directly by the
//! tracing subscriber.

use std::env;
use std::net::SocketAddr;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables.
///
/// # Example
///
/// ```rust,ignore
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.server_addr());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address (default: "0.0.0.0")
    pub host: String,

    /// Server port (default: 3000)
    pub port: u16,

    /// Fall back to the socket peer address when no header carries a client IP.
    ///
    /// Resolution itself never looks at the socket; this is a decision made
    /// by the `/` handler.
    pub fallback_to_peer_addr: bool,

    /// Port for Prometheus metrics endpoint (default: 9090, 0 = disabled)
    pub metrics_port: u16,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if any value fails to parse or the
    /// combination is invalid.
    pub fn from_env() -> AppResult<Self> {
        // Load an .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: Self::parse_env("PORT", 3000)?,
            fallback_to_peer_addr: Self::parse_env("FALLBACK_TO_PEER_ADDR", true)?,
            metrics_port: Self::parse_env("METRICS_PORT", 9090)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values for consistency and correctness.
    fn validate(&self) -> AppResult<()> {
        if self.port == 0 {
            return Err(AppError::ConfigError(
                "PORT must be greater than 0".to_string(),
            ));
        }

        if self.metrics_enabled() && self.metrics_port == self.port {
            return Err(AppError::ConfigError(format!(
                "METRICS_PORT ({}) must differ from PORT",
                self.metrics_port
            )));
        }

        Ok(())
    }

    /// Get the full server address for binding.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if Prometheus metrics export is enabled.
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_port > 0
    }

    /// Get the metrics endpoint address.
    ///
    /// Returns `None` if metrics are disabled (port = 0).
    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        self.metrics_enabled()
            .then(|| SocketAddr::from(([0, 0, 0, 0], self.metrics_port)))
    }

    /// Parse an environment variable into the specified type with a default value.
    fn parse_env<T>(name: &str, default: T) -> AppResult<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(name) {
            Ok(val) => val
                .trim()
                .parse()
                .map_err(|e| AppError::ConfigError(format!("Invalid {name}: {e}"))),
            Err(_) => Ok(default),
        }
    }
}

/// Default configuration for testing and development.
///
/// Production deployments should use `Config::from_env()` instead.
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            fallback_to_peer_addr: true,
            metrics_port: 9090,
        }
    }
}
