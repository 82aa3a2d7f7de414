use async_trait::async_trait;
use serde_json::Value;

use super::ClientError;

/// Header marking the single post-payment retry.
pub const RETRY_HEADER: &str = "x-retry-attempt";

/// A payment-required answer, handed to the [`PaymentHandler`].
#[derive(Debug, Clone)]
pub struct PaymentChallenge {
    /// The request URL without the JSON format flag, so the payment flow
    /// sees the resource the way a browser would.
    pub resource_url: String,
    /// Body of the 402 response (`Value::Null` when it was not JSON).
    pub body: Value,
}

/// Session state the payment handler established, attached to the retry.
#[derive(Debug, Clone, Default)]
pub struct PaymentSession {
    pub headers: Vec<(String, String)>,
}

impl PaymentSession {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Whatever satisfies the payment gate (a wallet widget, a facilitator).
#[async_trait]
pub trait PaymentHandler: Send + Sync {
    /// Complete payment for the challenged resource.
    async fn settle(&self, challenge: &PaymentChallenge) -> Result<PaymentSession, ClientError>;
}
