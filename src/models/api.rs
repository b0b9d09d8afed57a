use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the reported client address came from.
pub const SOURCE_PEER: &str = "peer";

/// Response for `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIpResponse {
    /// Client address, `null` when it could not be determined
    pub ip: Option<String>,
    /// Header name the address was taken from, `"peer"` for the socket
    /// address, `null` when nothing was found
    pub source: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Application version
    pub version: String,
    /// Current server time
    pub timestamp: DateTime<Utc>,
}
