//! Shared application state for Axum handlers.
//!
//! Resolution is stateless, so the only shared piece is the configuration,
//! kept behind an `Arc` so cloning the state per request stays cheap.

use std::sync::Arc;

use crate::config::Config;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Runtime configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create the application state from a loaded configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
