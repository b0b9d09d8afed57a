//! Prometheus metrics for client IP resolution.
//!
//! # Available Metrics
//!
//! ## Counters
//! - `client_ip_resolutions_total` - Resolutions by winning header (label: source,
//!   `none` when nothing resolved)
//! - `client_ip_invalid_header_total` - Requests rejected for a non-text
//!   forwarded-for value (label: header)
//!
//! # Usage
//!
//! ```rust,ignore
//! use request_ip::metrics::{init_metrics, record_resolution};
//!
//! init_metrics("0.0.0.0:9090".parse()?)?;
//! record_resolution("x-forwarded-for");
//! ```

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{error, info};

use crate::error::{AppError, AppResult};

/// Metric names as constants for consistency.
pub mod names {
    pub const RESOLUTIONS_TOTAL: &str = "client_ip_resolutions_total";
    pub const INVALID_HEADER_TOTAL: &str = "client_ip_invalid_header_total";
}

/// Label value used when no header carried a client IP.
pub const SOURCE_NONE: &str = "none";

/// Install the Prometheus exporter and describe all metrics.
///
/// # Errors
///
/// Returns `AppError::Internal` if the exporter cannot be installed
/// (typically because the listener address is already in use).
pub fn init_metrics(metrics_addr: SocketAddr) -> AppResult<()> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .map_err(|e| AppError::Internal(format!("Failed to install Prometheus exporter: {e}")))?;

    describe_counter!(
        names::RESOLUTIONS_TOTAL,
        "Total number of client IP resolutions by winning header"
    );
    describe_counter!(
        names::INVALID_HEADER_TOTAL,
        "Total number of requests carrying a non-text forwarded-for header"
    );

    info!(addr = %metrics_addr, "Prometheus metrics endpoint started");
    Ok(())
}

/// Try to initialize metrics, logging any errors but not failing.
pub fn try_init_metrics(metrics_addr: SocketAddr) {
    if let Err(e) = init_metrics(metrics_addr) {
        error!(error = %e, "Failed to initialize metrics, continuing without metrics");
    }
}

/// Record one resolution outcome.
pub fn record_resolution(source: &'static str) {
    counter!(names::RESOLUTIONS_TOTAL, "source" => source).increment(1);
}

/// Record a request rejected for a non-text forwarded-for header.
pub fn record_invalid_header(header: &'static str) {
    counter!(names::INVALID_HEADER_TOTAL, "header" => header).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Recording without an installed recorder is a no-op

    #[test]
    fn test_record_resolution() {
        record_resolution("x-forwarded-for");
        record_resolution(SOURCE_NONE);
    }

    #[test]
    fn test_record_invalid_header() {
        record_invalid_header("x-forwarded-for");
    }
}
