//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (applied in order)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │     Tracing      │ ← HTTP request/response logging
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │    Client IP     │ ← 400 on non-text X-Forwarded-For
//! └────────┬─────────┘
//!          │
//!          ▼
//!      Handler
//! ```
//!
//! # Routes
//!
//! - `/` - Resolved client IP
//! - `/health` - Health check

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::ClientIpLayer;
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` so the
/// `/` handler can fall back to the peer address.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::client_ip))
        .route("/health", get(handlers::health_check))
        // Applied bottom to top: tracing wraps client IP resolution
        .layer(ClientIpLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
