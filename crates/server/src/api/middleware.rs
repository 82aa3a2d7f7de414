//! Payment gate and metrics middleware.

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use spirit_core::metrics::PAYMENT_DECISIONS;
use spirit_core::payment::{PaymentDecision, PaymentError, PaymentRequest, PaymentRequiredBody};
use spirit_core::response::{error_headers, resolve_origin, ErrorBody, OriginHints};

use super::{header_map, with_headers};
use crate::metrics::{HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION};
use crate::state::AppState;

/// Label for requests that matched no route (static page, 404s).
const UNMATCHED_PATH: &str = "fallback";

/// Metrics middleware that tracks HTTP request duration and counts.
///
/// This middleware records:
/// - Request duration (histogram)
/// - Request count (counter)
/// - Requests in flight (gauge)
///
/// Requests are labelled with the matched route rather than the raw path.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());

    HTTP_REQUESTS_IN_FLIGHT.inc();

    let response = next.run(request).await;

    HTTP_REQUESTS_IN_FLIGHT.dec();

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUEST_DURATION
        .with_label_values(&[&method, &path, &status])
        .observe(duration);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    response
}

/// Payment middleware that consults the configured payment gate.
///
/// Pre-flights always pass. A `Required` decision answers `402` with the
/// payment requirements and the CORS echo headers, so credentialed browser
/// callers can read the status.
pub async fn payment_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    let headers = header_map(request.headers());
    let payment_request = PaymentRequest {
        headers,
        resource: request.uri().path().to_string(),
    };

    match state.payment_gate().check(&payment_request).await {
        Ok(PaymentDecision::Allowed) => {
            PAYMENT_DECISIONS.with_label_values(&["allowed"]).inc();
            next.run(request).await
        }
        Ok(PaymentDecision::Required(requirement)) => {
            PAYMENT_DECISIONS.with_label_values(&["required"]).inc();
            info!(
                resource = %payment_request.resource,
                price = %requirement.max_amount_required,
                "Payment required"
            );
            let origin = resolve_origin(&OriginHints::from_headers(&payment_request.headers));
            with_headers(
                (
                    StatusCode::PAYMENT_REQUIRED,
                    Json(PaymentRequiredBody::new(requirement)),
                )
                    .into_response(),
                error_headers(&origin),
            )
        }
        Err(e) => {
            PAYMENT_DECISIONS.with_label_values(&["error"]).inc();
            error!(error = %e, "Payment gate failed");
            let status = match &e {
                PaymentError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                PaymentError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let origin = resolve_origin(&OriginHints::from_headers(&payment_request.headers));
            with_headers(
                (status, Json(ErrorBody::new("Payment check failed", e.to_string())))
                    .into_response(),
                error_headers(&origin),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request},
        middleware,
        routing::get,
        Router,
    };
    use http_body_util::BodyExt;
    use spirit_core::config::{PaymentConfig, PaymentMethod};
    use spirit_core::testing::{fixtures, MockPaymentGate};
    use spirit_core::{load_config_from_str, Matcher, PaymentGate, TokenGate};
    use tower::ServiceExt;

    async fn dummy_handler() -> &'static str {
        "OK"
    }

    fn create_test_state(gate: Arc<dyn PaymentGate>) -> Arc<AppState> {
        let config = load_config_from_str(
            r#"
[payment]
method = "none"
"#,
        )
        .unwrap();
        Arc::new(AppState::new(
            config,
            fixtures::dataset(&["Cat", "Dog"]),
            Matcher::default(),
            gate,
        ))
    }

    fn token_gate() -> Arc<dyn PaymentGate> {
        let config = PaymentConfig {
            method: PaymentMethod::Token,
            token: Some("paid".to_string()),
            price: "$0.001".to_string(),
            network: "solana-devnet".to_string(),
            pay_to: None,
            description: "lookup".to_string(),
        };
        Arc::new(TokenGate::new("paid".to_string(), config))
    }

    fn gated_app(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/test", get(dummy_handler).options(dummy_handler))
            .layer(middleware::from_fn_with_state(state.clone(), payment_middleware))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_allowed_request_reaches_handler() {
        let gate = MockPaymentGate::allowing();
        let app = gated_app(create_test_state(Arc::new(gate.clone())));

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(gate.check_count(), 1);
        assert_eq!(gate.recorded_requests()[0].resource, "/test");
    }

    #[tokio::test]
    async fn test_required_payment_answers_402_with_cors() {
        let app = gated_app(create_test_state(token_gate()));

        let request = Request::builder()
            .uri("/test")
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "https://example.com"
        );
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["x402Version"], 1);
        assert_eq!(json["accepts"][0]["maxAmountRequired"], "$0.001");
        assert_eq!(json["accepts"][0]["network"], "solana-devnet");
    }

    #[tokio::test]
    async fn test_settlement_token_passes() {
        let app = gated_app(create_test_state(token_gate()));

        let request = Request::builder()
            .uri("/test")
            .header("X-PAYMENT", "paid")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_preflight_skips_gate() {
        let gate = MockPaymentGate::requiring();
        let app = gated_app(create_test_state(Arc::new(gate.clone())));

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/test")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(gate.check_count(), 0);
    }

    #[tokio::test]
    async fn test_gate_failure_is_service_unavailable() {
        let gate = MockPaymentGate::allowing().then_fail();
        let app = gated_app(create_test_state(Arc::new(gate)));

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Payment check failed");
    }
}
