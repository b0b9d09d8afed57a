//! End-to-end tests against a real server bound to an ephemeral port.
//!
//! Run with: `cargo test --test integration_tests`
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::net::TcpListener;

use request_ip::models::{ClientIpResponse, HealthResponse};
use request_ip::{AppState, Config, build_router};

/// Test fixture that runs the app server in the background.
struct TestFixture {
    base_url: String,
    client: Client,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    async fn with_config(config: Config) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to ephemeral port");
        let addr = listener.local_addr().expect("Failed to get local address");

        let app = build_router(AppState::new(config));
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Server failed");
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn whoami(&self, headers: &[(&str, &str)]) -> ClientIpResponse {
        let mut request = self.client.get(self.url("/"));
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.expect("Request failed");
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.expect("Invalid JSON body")
    }
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let response = fixture.client.get(fixture.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: HealthResponse = response.json().await.unwrap();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// Header Resolution
// =============================================================================

#[tokio::test]
async fn test_forwarded_for_chain_resolves_first_hop() {
    let fixture = TestFixture::new().await;

    let body = fixture
        .whoami(&[("X-Forwarded-For", "203.0.113.5, 70.41.3.18, 150.172.238.178")])
        .await;

    assert_eq!(body.ip.as_deref(), Some("203.0.113.5"));
    assert_eq!(body.source.as_deref(), Some("x-forwarded-for"));
}

#[tokio::test]
async fn test_forwarded_for_skips_unknown() {
    let fixture = TestFixture::new().await;

    let body = fixture
        .whoami(&[("x-forwarded-for", "unknown, 70.41.3.18")])
        .await;

    assert_eq!(body.ip.as_deref(), Some("70.41.3.18"));
}

#[tokio::test]
async fn test_forwarded_for_strips_port() {
    let fixture = TestFixture::new().await;

    let body = fixture
        .whoami(&[("x-forwarded-for", "203.0.113.5:4711, 70.41.3.18")])
        .await;

    assert_eq!(body.ip.as_deref(), Some("203.0.113.5"));
}

#[tokio::test]
async fn test_client_ip_header_has_priority() {
    let fixture = TestFixture::new().await;

    let body = fixture
        .whoami(&[("x-forwarded-for", "1.1.1.1"), ("x-client-ip", "9.9.9.9")])
        .await;

    assert_eq!(body.ip.as_deref(), Some("9.9.9.9"));
    assert_eq!(body.source.as_deref(), Some("x-client-ip"));
}

#[tokio::test]
async fn test_vendor_header_resolves() {
    let fixture = TestFixture::new().await;

    let body = fixture
        .whoami(&[("CF-Connecting-IP", "2001:db8::42")])
        .await;

    assert_eq!(body.ip.as_deref(), Some("2001:db8::42"));
    assert_eq!(body.source.as_deref(), Some("cf-connecting-ip"));
}

// =============================================================================
// Fallbacks
// =============================================================================

#[tokio::test]
async fn test_falls_back_to_peer_address() {
    let fixture = TestFixture::new().await;

    let body = fixture.whoami(&[("x-real-ip", "not-an-ip")]).await;

    assert_eq!(body.ip.as_deref(), Some("127.0.0.1"));
    assert_eq!(body.source.as_deref(), Some("peer"));
}

#[tokio::test]
async fn test_no_fallback_when_disabled() {
    let fixture = TestFixture::with_config(Config {
        fallback_to_peer_addr: false,
        ..Config::default()
    })
    .await;

    let body = fixture.whoami(&[]).await;

    assert_eq!(
        body,
        ClientIpResponse {
            ip: None,
            source: None
        }
    );
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_non_text_forwarded_for_is_bad_request() {
    let fixture = TestFixture::new().await;

    let value = reqwest::header::HeaderValue::from_bytes(b"\xff10.0.0.1").unwrap();
    let response = fixture
        .client
        .get(fixture.url("/"))
        .header("x-forwarded-for", value)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "bad_request");
}
