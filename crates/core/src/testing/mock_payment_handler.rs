//! Mock payment handler for testing the client orchestrator.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::client::{ClientError, PaymentChallenge, PaymentHandler, PaymentSession};

/// Mock implementation of the PaymentHandler trait.
///
/// Returns a fixed session (empty by default), or fails when configured to,
/// and records every challenge it receives.
#[derive(Clone, Default)]
pub struct MockPaymentHandler {
    session: PaymentSession,
    failure: Option<String>,
    settles: Arc<AtomicUsize>,
    challenges: Arc<Mutex<Vec<PaymentChallenge>>>,
}

impl MockPaymentHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler whose session carries `X-PAYMENT: <token>`.
    pub fn paying_with(token: &str) -> Self {
        Self {
            session: PaymentSession::default().with_header("x-payment", token),
            ..Self::default()
        }
    }

    /// Handler that fails to settle.
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn settle_count(&self) -> usize {
        self.settles.load(Ordering::SeqCst)
    }

    pub fn recorded_challenges(&self) -> Vec<PaymentChallenge> {
        self.challenges.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentHandler for MockPaymentHandler {
    async fn settle(&self, challenge: &PaymentChallenge) -> Result<PaymentSession, ClientError> {
        self.settles.fetch_add(1, Ordering::SeqCst);
        self.challenges.lock().unwrap().push(challenge.clone());

        match &self.failure {
            Some(reason) => Err(ClientError::PaymentFailed(reason.clone())),
            None => Ok(self.session.clone()),
        }
    }
}
