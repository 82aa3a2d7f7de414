//! Settlement-token payment gate.

use async_trait::async_trait;
use tracing::debug;

use crate::config::PaymentConfig;

use super::{PaymentDecision, PaymentError, PaymentGate, PaymentRequest, PaymentRequirement};

/// Cookie a payment session may use instead of the `X-PAYMENT` header.
pub const SESSION_COOKIE: &str = "payment_session";

/// Gate that lets a request through once it carries the settlement token.
///
/// Accepts the token in either:
/// - `X-PAYMENT: <token>` header
/// - `payment_session=<token>` cookie
pub struct TokenGate {
    expected_token: String,
    config: PaymentConfig,
}

impl TokenGate {
    pub fn new(token: String, config: PaymentConfig) -> Self {
        Self {
            expected_token: token,
            config,
        }
    }

    /// Extract the settlement token from request headers.
    fn extract_token<'a>(&self, request: &'a PaymentRequest) -> Option<&'a str> {
        if let Some(token) = request.headers.get("x-payment") {
            return Some(token.trim());
        }

        request.headers.get("cookie").and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                (name.trim() == SESSION_COOKIE).then(|| value.trim())
            })
        })
    }
}

#[async_trait]
impl PaymentGate for TokenGate {
    async fn check(&self, request: &PaymentRequest) -> Result<PaymentDecision, PaymentError> {
        let settled = self
            .extract_token(request)
            .is_some_and(|token| constant_time_eq(token.as_bytes(), self.expected_token.as_bytes()));

        if settled {
            return Ok(PaymentDecision::Allowed);
        }

        debug!(resource = %request.resource, "No valid settlement token");
        Ok(PaymentDecision::Required(PaymentRequirement::for_resource(
            &self.config,
            &request.resource,
        )))
    }

    fn method_name(&self) -> &'static str {
        "token"
    }
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
