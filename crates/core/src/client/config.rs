//! Client orchestrator configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`AnimalClient`](super::AnimalClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme and authority of the service, e.g. "http://localhost:8080".
    pub base_url: String,

    /// Path of the matching endpoint.
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    /// Wait after the payment handler returns, letting the payment session
    /// settle before the single retry (milliseconds).
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint_path() -> String {
    "/api/animals".to_string()
}

fn default_settle_delay() -> u64 {
    1500
}

fn default_timeout() -> u64 {
    30
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoint_path: default_endpoint_path(),
            settle_delay_ms: default_settle_delay(),
            timeout_secs: default_timeout(),
        }
    }

    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the matching endpoint.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint_path
        )
    }
}
