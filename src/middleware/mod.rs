//! HTTP middleware for client IP resolution.
//!
//! - **Client IP**: resolves the originating client address from proxy
//!   headers and stores it as a request extension
//!
//! # Architecture
//!
//! ```text
//! Request → Trace → Client IP → Handler → Response
//!                       ↓
//!                400 on non-text X-Forwarded-For
//! ```

pub mod ip;

pub use ip::{ClientIpExt, ClientIpLayer, ResolvedClientIp};
