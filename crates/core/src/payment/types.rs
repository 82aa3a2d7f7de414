use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::PaymentConfig;

/// Protocol version advertised in payment-required bodies.
pub const X402_VERSION: u32 = 1;

/// Request information for a payment check
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// Header names are lowercased
    pub headers: HashMap<String, String>,
    /// Path of the resource being paid for
    pub resource: String,
}

/// Outcome of a payment check
#[derive(Debug, Clone)]
pub enum PaymentDecision {
    Allowed,
    Required(PaymentRequirement),
}

impl PaymentDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, PaymentDecision::Allowed)
    }
}

/// What a caller must pay to get through the gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequirement {
    pub scheme: String,
    pub network: String,
    pub max_amount_required: String,
    pub resource: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_to: Option<String>,
    pub mime_type: String,
    /// Single-use value tying a payment to this challenge
    pub nonce: String,
}

impl PaymentRequirement {
    pub fn for_resource(config: &PaymentConfig, resource: &str) -> Self {
        Self {
            scheme: "exact".to_string(),
            network: config.network.clone(),
            max_amount_required: config.price.clone(),
            resource: resource.to_string(),
            description: config.description.clone(),
            pay_to: config.pay_to.clone(),
            mime_type: "application/json".to_string(),
            nonce: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Body of a 402 response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequiredBody {
    pub x402_version: u32,
    pub error: String,
    pub accepts: Vec<PaymentRequirement>,
}

impl PaymentRequiredBody {
    pub fn new(requirement: PaymentRequirement) -> Self {
        Self {
            x402_version: X402_VERSION,
            error: "X-PAYMENT header is required".to_string(),
            accepts: vec![requirement],
        }
    }
}
