//! Client IP echo endpoint.
//!
//! # Endpoints
//!
//! - `GET /` - Report the client address as resolved from proxy headers
//!
//! When no header resolves and `FALLBACK_TO_PEER_ADDR` is enabled, the socket
//! peer address is reported instead. That fallback lives here, not in the
//! resolver: whether a transport-level address is acceptable is the caller's
//! call.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, Request, State};
use tracing::{debug, instrument};

use crate::middleware::ResolvedClientIp;
use crate::models::{ClientIpResponse, SOURCE_PEER};
use crate::state::AppState;

/// Report the resolved client address.
///
/// # Response Body
///
/// ```json
/// {
///   "ip": "203.0.113.5",
///   "source": "x-forwarded-for"
/// }
/// ```
#[instrument(skip_all)]
pub async fn client_ip(
    State(state): State<AppState>,
    ResolvedClientIp(resolved): ResolvedClientIp,
    req: Request,
) -> Json<ClientIpResponse> {
    if let Some(ip) = resolved {
        return Json(ClientIpResponse {
            source: Some(ip.source().to_string()),
            ip: Some(ip.into_string()),
        });
    }

    let peer = state
        .config
        .fallback_to_peer_addr
        .then(|| req.extensions().get::<ConnectInfo<SocketAddr>>())
        .flatten();

    match peer {
        Some(ConnectInfo(addr)) => {
            debug!(peer = %addr, "Falling back to socket peer address");
            Json(ClientIpResponse {
                ip: Some(addr.ip().to_string()),
                source: Some(SOURCE_PEER.to_string()),
            })
        }
        None => Json(ClientIpResponse {
            ip: None,
            source: None,
        }),
    }
}
