//! Payment gate in front of the matching endpoint.

mod free;
mod token;
mod traits;
mod types;

pub use free::*;
pub use token::*;
pub use traits::*;
pub use types::*;

use crate::config::PaymentConfig;

/// Factory function to create a payment gate from config
pub fn create_payment_gate(config: &PaymentConfig) -> Result<Box<dyn PaymentGate>, PaymentError> {
    use crate::config::PaymentMethod;

    match config.method {
        PaymentMethod::None => Ok(Box::new(FreeGate::new())),
        PaymentMethod::Token => {
            let token = config
                .token
                .clone()
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    PaymentError::ConfigurationError(
                        "token must be set when using the token payment method".to_string(),
                    )
                })?;
            Ok(Box::new(TokenGate::new(token, config.clone())))
        }
    }
}
