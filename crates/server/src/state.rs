use std::sync::Arc;
use spirit_core::{Config, Dataset, Matcher, PaymentGate, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    dataset: Dataset,
    matcher: Matcher,
    payment_gate: Arc<dyn PaymentGate>,
}

impl AppState {
    pub fn new(
        config: Config,
        dataset: Dataset,
        matcher: Matcher,
        payment_gate: Arc<dyn PaymentGate>,
    ) -> Self {
        Self {
            config,
            dataset,
            matcher,
            payment_gate,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    /// The catalog loaded at startup; never empty.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn payment_gate(&self) -> &dyn PaymentGate {
        self.payment_gate.as_ref()
    }
}
