use async_trait::async_trait;

use super::{PaymentDecision, PaymentError, PaymentGate, PaymentRequest};

/// Gate that lets every request through
/// Must be explicitly configured - the system won't default to this
pub struct FreeGate;

impl FreeGate {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FreeGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGate for FreeGate {
    async fn check(&self, _request: &PaymentRequest) -> Result<PaymentDecision, PaymentError> {
        Ok(PaymentDecision::Allowed)
    }

    fn method_name(&self) -> &'static str {
        "none"
    }
}
