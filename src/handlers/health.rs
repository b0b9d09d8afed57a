//! Health endpoint.

use axum::Json;
use chrono::Utc;
use tracing::instrument;

use crate::models::HealthResponse;

/// Health check endpoint.
///
/// Resolution has no external dependencies, so the service is healthy
/// whenever it answers.
///
/// # Response Body
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "timestamp": "2024-01-15T10:30:00Z"
/// }
/// ```
#[instrument]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}
