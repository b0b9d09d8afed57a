//! Client IP middleware and extractor.
//!
//! [`ClientIpLayer`] resolves the client address once per request and stores
//! the outcome as a [`ResolvedClientIp`] request extension. Handlers read it
//! back through the [`ResolvedClientIp`] extractor or [`ClientIpExt`].
//!
//! ```text
//! Request ─► ClientIpLayer ─► resolve(headers)
//!                               │
//!              ┌────────────────┼──────────────────┐
//!              ▼                ▼                  ▼
//!        Ok(Some(ip))       Ok(None)     Err(InvalidInputType)
//!        extension set      extension set    400 Bad Request
//!              │                │
//!              └───────► Handler ◄┘
//! ```
//!
//! # Security Warning: IP Spoofing Risk
//!
//! **Every header consulted here is client-controlled.** A client reaching
//! the service directly can claim any address. Deploy behind a reverse proxy
//! that overwrites (not appends to) these headers, and block direct access.

use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{Request, Response};
use axum::response::IntoResponse;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::{AppError, ResolveError};
use crate::metrics::{SOURCE_NONE, record_invalid_header, record_resolution};
use crate::resolver::{ClientIp, resolve};

/// Outcome of client IP resolution for one request.
///
/// `None` means no header carried a valid address, which is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClientIp(pub Option<ClientIp>);

/// Client IP layer for Tower middleware stack.
#[derive(Clone, Default)]
pub struct ClientIpLayer;

impl ClientIpLayer {
    /// Create a new client IP layer.
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for ClientIpLayer {
    type Service = ClientIpService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ClientIpService { inner }
    }
}

/// Client IP service wrapper.
#[derive(Clone)]
pub struct ClientIpService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for ClientIpService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let resolved = match resolve_and_record(req.headers()) {
            Ok(resolved) => resolved,
            Err(e) => {
                let response = AppError::from(e).into_response();
                return Box::pin(async move { Ok(response) });
            }
        };

        req.extensions_mut().insert(resolved);

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

/// Resolve from `headers`, logging and counting the outcome.
fn resolve_and_record(headers: &axum::http::HeaderMap) -> Result<ResolvedClientIp, ResolveError> {
    match resolve(headers) {
        Ok(Some(ip)) => {
            debug!(client_ip = %ip, source = %ip.source(), "Client IP resolved");
            record_resolution(ip.source().as_str());
            Ok(ResolvedClientIp(Some(ip)))
        }
        Ok(None) => {
            debug!("No client IP headers found - request may be bypassing reverse proxy");
            record_resolution(SOURCE_NONE);
            Ok(ResolvedClientIp(None))
        }
        Err(e) => {
            let ResolveError::InvalidInputType { header } = e;
            warn!(header, "Rejecting request with non-text forwarded-for header");
            record_invalid_header(header);
            Err(e)
        }
    }
}

impl<S> FromRequestParts<S> for ResolvedClientIp
where
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Reuse the layer's result when present, otherwise resolve on demand.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(resolved) = parts.extensions.get::<ResolvedClientIp>() {
            return Ok(resolved.clone());
        }

        Ok(resolve_and_record(&parts.headers)?)
    }
}

/// Extension trait to read the resolved client IP from requests.
pub trait ClientIpExt {
    /// The client IP stored by [`ClientIpLayer`], if one was resolved.
    fn client_ip(&self) -> Option<&ClientIp>;
}

impl<B> ClientIpExt for Request<B> {
    fn client_ip(&self) -> Option<&ClientIp> {
        self.extensions()
            .get::<ResolvedClientIp>()
            .and_then(|resolved| resolved.0.as_ref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use std::convert::Infallible;
    use tower::ServiceExt;

    use crate::resolver::ClientIpHeader;

    /// Echo service returning the resolved IP (or "none") as the body.
    async fn echo(req: Request<Body>) -> Result<Response<Body>, Infallible> {
        let body = req
            .client_ip()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "none".to_string());
        Ok(Response::new(Body::from(body)))
    }

    async fn body_string(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_layer_attaches_client_ip() {
        let service = ClientIpLayer::new().layer(tower::service_fn(echo));
        let req = Request::builder()
            .header("x-forwarded-for", "unknown, 70.41.3.18")
            .body(Body::empty())
            .unwrap();

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "70.41.3.18");
    }

    #[tokio::test]
    async fn test_layer_without_headers_passes_through() {
        let service = ClientIpLayer::new().layer(tower::service_fn(echo));
        let req = Request::builder().body(Body::empty()).unwrap();

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "none");
    }

    #[tokio::test]
    async fn test_layer_rejects_non_text_forwarded_for() {
        let service = ClientIpLayer::new().layer(tower::service_fn(echo));
        let mut req = Request::builder().body(Body::empty()).unwrap();
        req.headers_mut().insert(
            "x-forwarded-for",
            HeaderValue::from_bytes(b"\xfe10.0.0.1").unwrap(),
        );

        let response = service.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extractor_resolves_without_layer() {
        let (mut parts, _) = Request::builder()
            .header("x-real-ip", "192.168.1.1")
            .body(())
            .unwrap()
            .into_parts();

        let ResolvedClientIp(ip) = ResolvedClientIp::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        let ip = ip.unwrap();
        assert_eq!(ip, "192.168.1.1");
        assert_eq!(ip.source(), ClientIpHeader::XRealIp);
    }

    #[tokio::test]
    async fn test_extractor_prefers_layer_result() {
        let (mut parts, _) = Request::builder()
            .header("x-real-ip", "192.168.1.1")
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(ResolvedClientIp(None));

        let resolved = ResolvedClientIp::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(resolved, ResolvedClientIp(None));
    }

    #[tokio::test]
    async fn test_extractor_rejects_non_text_forwarded_for() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        parts.headers.insert(
            "x-forwarded-for",
            HeaderValue::from_bytes(b"\x80").unwrap(),
        );

        let err = ResolvedClientIp::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
