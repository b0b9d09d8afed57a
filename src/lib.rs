//! # request_ip
//!
//! Resolve the originating client IP of an HTTP request that reached the
//! service through reverse proxies, load balancers or CDNs.
//!
//! - **Validation**: IPv4 / IPv6 literal predicates
//! - **Forwarded-for decomposition**: first valid hop of `X-Forwarded-For`
//! - **Resolution**: fixed precedence over thirteen vendor and standard headers
//! - **Axum integration**: a Tower layer and an extractor
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ClientIpLayer / ResolvedClientIp extractor (Axum, Tower)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  resolve(&impl HeaderSource)  ── header precedence table    │
//! ├──────────────────────────────┬──────────────────────────────┤
//! │  extract_forwarded_candidates│  is_valid_ip (v4 || v6)      │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! Resolution is a pure function of the request headers. It never looks at
//! the socket; `Ok(None)` means "could not tell" and the caller decides what
//! to do about it.
//!
//! ## Quick Start
//!
//! ```
//! use std::collections::HashMap;
//! use request_ip::{ClientIpHeader, resolve};
//!
//! let mut headers = HashMap::new();
//! headers.insert("X-Forwarded-For".to_string(), "203.0.113.5, 70.41.3.18".to_string());
//!
//! let ip = resolve(&headers).unwrap().unwrap();
//! assert_eq!(ip.as_str(), "203.0.113.5");
//! assert_eq!(ip.source(), ClientIpHeader::XForwardedFor);
//! ```
//!
//! With Axum:
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use request_ip::middleware::{ClientIpLayer, ResolvedClientIp};
//!
//! async fn handler(ResolvedClientIp(ip): ResolvedClientIp) -> String {
//!     ip.map(|ip| ip.to_string()).unwrap_or_default()
//! }
//!
//! let app: Router = Router::new().route("/", get(handler)).layer(ClientIpLayer::new());
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod state;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use error::{AppError, AppResult, ResolveError};
pub use resolver::{
    ClientIp, ClientIpHeader, HeaderSource, PRECEDENCE, Strategy, extract_forwarded_candidates,
    forwarded_candidates, resolve,
};
pub use routes::build_router;
pub use state::AppState;
pub use validation::{is_ipv4, is_ipv6, is_valid_ip, parse_ip};
