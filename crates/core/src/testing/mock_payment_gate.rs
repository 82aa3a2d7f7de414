//! Mock payment gate for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::{PaymentConfig, PaymentMethod};
use crate::payment::{
    PaymentDecision, PaymentError, PaymentGate, PaymentRequest, PaymentRequirement,
};

/// Scripted outcome for the next check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scripted {
    Allow,
    Require,
    Fail,
}

/// Mock implementation of the PaymentGate trait.
///
/// Answers from a queue of scripted outcomes, falling back to a default once
/// the queue is empty, and records every request it sees.
#[derive(Clone)]
pub struct MockPaymentGate {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    default: Scripted,
    requests: Arc<Mutex<Vec<PaymentRequest>>>,
}

impl MockPaymentGate {
    /// Gate that allows everything unless scripted otherwise.
    pub fn allowing() -> Self {
        Self::with_default(Scripted::Allow)
    }

    /// Gate that requires payment unless scripted otherwise.
    pub fn requiring() -> Self {
        Self::with_default(Scripted::Require)
    }

    fn with_default(default: Scripted) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue an allowed decision.
    pub fn then_allow(self) -> Self {
        self.push(Scripted::Allow)
    }

    /// Queue a payment-required decision.
    pub fn then_require(self) -> Self {
        self.push(Scripted::Require)
    }

    /// Queue a gate failure.
    pub fn then_fail(self) -> Self {
        self.push(Scripted::Fail)
    }

    fn push(self, outcome: Scripted) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    /// Requests checked so far.
    pub fn recorded_requests(&self) -> Vec<PaymentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn check_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn requirement_config() -> PaymentConfig {
        PaymentConfig {
            method: PaymentMethod::Token,
            token: None,
            price: "$0.001".to_string(),
            network: "solana-devnet".to_string(),
            pay_to: Some("mock-receiver".to_string()),
            description: "Mock spirit animal lookup".to_string(),
        }
    }
}

#[async_trait]
impl PaymentGate for MockPaymentGate {
    async fn check(&self, request: &PaymentRequest) -> Result<PaymentDecision, PaymentError> {
        self.requests.lock().unwrap().push(request.clone());
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default);

        match outcome {
            Scripted::Allow => Ok(PaymentDecision::Allowed),
            Scripted::Require => Ok(PaymentDecision::Required(
                PaymentRequirement::for_resource(&Self::requirement_config(), &request.resource),
            )),
            Scripted::Fail => Err(PaymentError::ServiceUnavailable(
                "mock facilitator offline".to_string(),
            )),
        }
    }

    fn method_name(&self) -> &'static str {
        "mock"
    }
}
