//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with an injected dataset, tie breaker and payment gate, enabling E2E
//! testing without a listening socket.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use spirit_core::{
    config::{DatasetConfig, MatcherConfig, PaymentConfig, PaymentMethod, ServerConfig},
    testing::FixedTieBreaker,
    Config, FreeGate, Matcher, PaymentGate, TokenGate,
};

/// Re-export fixtures for test convenience
pub use spirit_core::testing::fixtures;

/// Settlement token accepted by [`TestConfig::paid`] fixtures.
pub const TEST_TOKEN: &str = "settled-token";

/// Markup served as the interactive page.
pub const PAGE_HTML: &str = "<!doctype html><title>Spirit Animal</title>";

/// Test fixture for E2E testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_match() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.get("/api/animals?name=act&format=json").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Temporary directory holding the interactive page
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` when the body is empty or not JSON
    pub body: Value,
    pub text: String,
}

impl TestResponse {
    /// Header value as a string, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestFixture {
    /// Free gate, Cat/Tac/Dog catalog, first tied animal wins.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let page_dir = temp_dir.path().join("web");
        std::fs::create_dir_all(&page_dir).expect("Failed to create page dir");
        std::fs::write(page_dir.join("index.html"), PAGE_HTML).expect("Failed to write page");

        let payment = PaymentConfig {
            method: if test_config.paid {
                PaymentMethod::Token
            } else {
                PaymentMethod::None
            },
            token: test_config.paid.then(|| TEST_TOKEN.to_string()),
            price: "$0.001".to_string(),
            network: "solana-devnet".to_string(),
            pay_to: Some("test-receiver".to_string()),
            description: "Test lookup".to_string(),
        };

        let config = Config {
            payment: payment.clone(),
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
                page_dir,
                page_path: "/animals".to_string(),
            },
            dataset: DatasetConfig::default(),
            matcher: MatcherConfig::default(),
        };

        let gate: Arc<dyn PaymentGate> = match test_config.gate {
            Some(gate) => gate,
            None if test_config.paid => {
                Arc::new(TokenGate::new(TEST_TOKEN.to_string(), payment))
            }
            None => Arc::new(FreeGate::new()),
        };

        let state = Arc::new(spirit_server::state::AppState::new(
            config,
            fixtures::dataset(&test_config.animals),
            Matcher::new(Arc::new(FixedTieBreaker::new(test_config.pick))),
            gate,
        ));

        let router = spirit_server::api::create_router(state);

        Self { router, temp_dir }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, &[], Body::empty()).await
    }

    /// Send a GET request with extra headers.
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.request(Method::GET, path, headers, Body::empty()).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let body = Body::from(serde_json::to_vec(&body).unwrap());
        self.request(
            Method::POST,
            path,
            &[("Content-Type", "application/json")],
            body,
        )
        .await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.request(
            Method::POST,
            path,
            &[("Content-Type", "application/json")],
            Body::from(body.to_string()),
        )
        .await
    }

    /// Send a POST request with JSON body and a session cookie.
    pub async fn post_with_cookie(&self, path: &str, cookie: &str, body: Value) -> TestResponse {
        let body = Body::from(serde_json::to_vec(&body).unwrap());
        self.request(
            Method::POST,
            path,
            &[("Content-Type", "application/json"), ("Cookie", cookie)],
            body,
        )
        .await
    }

    /// Send an OPTIONS pre-flight.
    pub async fn options(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.request(Method::OPTIONS, path, headers, Body::empty())
            .await
    }

    /// Send a request to the test server.
    async fn request(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
        body: Body,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            request_builder = request_builder.header(*name, *value);
        }
        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };
        let text = String::from_utf8_lossy(&body_bytes).into_owned();

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

/// Configuration for test fixture.
#[derive(Clone)]
pub struct TestConfig {
    /// Animal names in the catalog
    pub animals: Vec<&'static str>,
    /// Index the tie breaker picks
    pub pick: usize,
    /// Require the settlement token
    pub paid: bool,
    /// Explicit gate, overriding `paid`
    pub gate: Option<Arc<dyn PaymentGate>>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            animals: vec!["Cat", "Tac", "Dog"],
            pick: 0,
            paid: false,
            gate: None,
        }
    }
}

impl TestConfig {
    /// Create config with the token payment gate enabled.
    pub fn paid() -> Self {
        Self {
            paid: true,
            ..Self::default()
        }
    }

    /// Create config with a custom gate.
    pub fn with_gate(gate: Arc<dyn PaymentGate>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
