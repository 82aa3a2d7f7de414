//! Client-side choreography around the payment gate.
//!
//! [`AnimalClient`] always asks for JSON. When the gate answers 402 it hands
//! the challenge to a [`PaymentHandler`], waits for the session to settle and
//! retries exactly once. Every failure is reported as a categorized
//! [`ClientError`].

mod config;
mod error;
mod types;

pub use config::ClientConfig;
pub use error::{ClientError, ErrorCategory};
pub use types::{PaymentChallenge, PaymentHandler, PaymentSession, RETRY_HEADER};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::metrics::CLIENT_ATTEMPTS;
use crate::response::AnimalResponse;

/// Result of a single request.
#[derive(Debug)]
enum Attempt {
    Matched(AnimalResponse),
    PaymentRequired(PaymentChallenge),
}

/// Calls the matching endpoint on behalf of a visitor.
pub struct AnimalClient {
    http: Client,
    config: ClientConfig,
    payment: Arc<dyn PaymentHandler>,
}

impl AnimalClient {
    pub fn new(config: ClientConfig, payment: Arc<dyn PaymentHandler>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            config,
            payment,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the spirit animal for `name`, paying once if the gate asks.
    pub async fn fetch_animal(&self, name: &str) -> Result<AnimalResponse, ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::EmptyName);
        }

        let challenge = match self.attempt(name, None).await? {
            Attempt::Matched(response) => return Ok(response),
            Attempt::PaymentRequired(challenge) => challenge,
        };

        info!(resource = %challenge.resource_url, "Payment required, handing over to payment handler");
        let session = self.payment.settle(&challenge).await?;

        tokio::time::sleep(self.config.settle_delay()).await;

        match self.attempt(name, Some(&session)).await? {
            Attempt::Matched(response) => Ok(response),
            Attempt::PaymentRequired(_) => {
                warn!("Payment still required after settling; giving up");
                Err(ClientError::PaymentRequired(
                    "payment was not accepted on retry".to_string(),
                ))
            }
        }
    }

    /// URL of the resource as the payment flow should see it (no format flag).
    fn resource_url(&self, name: &str) -> String {
        format!(
            "{}?name={}",
            self.config.endpoint_url(),
            urlencoding::encode(name)
        )
    }

    async fn attempt(
        &self,
        name: &str,
        session: Option<&PaymentSession>,
    ) -> Result<Attempt, ClientError> {
        let mut request = self
            .http
            .get(self.config.endpoint_url())
            .query(&[("name", name), ("format", "json")])
            .header(ACCEPT, "application/json");

        if let Some(session) = session {
            request = request.header(RETRY_HEADER, "1");
            for (header, value) in &session.headers {
                request = request.header(header.as_str(), value.as_str());
            }
        }

        debug!(name, retry = session.is_some(), "Requesting animal match");
        let response = request.send().await.map_err(|e| {
            CLIENT_ATTEMPTS.with_label_values(&["network_error"]).inc();
            ClientError::from_transport(e)
        })?;

        let status = response.status();
        if status == StatusCode::PAYMENT_REQUIRED {
            CLIENT_ATTEMPTS.with_label_values(&["payment_required"]).inc();
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text).unwrap_or(Value::Null);
            return Ok(Attempt::PaymentRequired(PaymentChallenge {
                resource_url: self.resource_url(name),
                body,
            }));
        }

        if !status.is_success() {
            CLIENT_ATTEMPTS.with_label_values(&["server_error"]).inc();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let is_json = content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));
        if !is_json {
            CLIENT_ATTEMPTS.with_label_values(&["format_error"]).inc();
            return Err(ClientError::UnexpectedFormat { content_type });
        }

        let bytes = response.bytes().await.map_err(ClientError::from_transport)?;
        let matched: AnimalResponse = serde_json::from_slice(&bytes).map_err(|e| {
            CLIENT_ATTEMPTS.with_label_values(&["format_error"]).inc();
            ClientError::InvalidJson(e.to_string())
        })?;

        CLIENT_ATTEMPTS.with_label_values(&["matched"]).inc();
        Ok(Attempt::Matched(matched))
    }
}
