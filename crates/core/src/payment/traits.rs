use async_trait::async_trait;
use thiserror::Error;

use super::types::{PaymentDecision, PaymentRequest};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Gate placed in front of the matching endpoint.
///
/// The gate only reports whether a call may proceed; how payment is
/// negotiated and settled is its own business.
#[async_trait]
pub trait PaymentGate: Send + Sync {
    /// Decide whether the request may reach the matcher
    async fn check(&self, request: &PaymentRequest) -> Result<PaymentDecision, PaymentError>;

    /// Name of this payment method
    fn method_name(&self) -> &'static str;
}
