use super::{types::Config, ConfigError, PaymentMethod};

/// Validate configuration
/// Currently validates:
/// - Payment section exists (enforced by serde)
/// - Server port is not 0
/// - Page path is absolute and carries no query or fragment
/// - Token gate has a token
/// - Price is a positive dollar amount
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if !config.server.page_path.starts_with('/') {
        return Err(ConfigError::ValidationError(format!(
            "server.page_path must start with '/', got {:?}",
            config.server.page_path
        )));
    }

    // The redirect appends its own `?name=` query
    if config.server.page_path.contains(['?', '#']) {
        return Err(ConfigError::ValidationError(format!(
            "server.page_path must not contain a query or fragment, got {:?}",
            config.server.page_path
        )));
    }

    if config.payment.method == PaymentMethod::Token
        && config.payment.token.as_deref().unwrap_or("").is_empty()
    {
        return Err(ConfigError::ValidationError(
            "payment.token must be set when using the token payment method".to_string(),
        ));
    }

    if parse_price(&config.payment.price).is_none() {
        return Err(ConfigError::ValidationError(format!(
            "payment.price must look like \"$0.001\", got {:?}",
            config.payment.price
        )));
    }

    Ok(())
}

/// Parse a "$<amount>" price into its dollar value.
fn parse_price(price: &str) -> Option<f64> {
    let amount: f64 = price.strip_prefix('$')?.parse().ok()?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn free_config() -> Config {
        load_config_from_str(
            r#"
[payment]
method = "none"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&free_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = free_config();
        config.server.port = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_relative_page_path_fails() {
        let mut config = free_config();
        config.server.page_path = "animals".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_page_path_with_query_or_fragment_fails() {
        let mut config = free_config();
        for bad in ["/animals?theme=x", "/animals#top", "/?"] {
            config.server.page_path = bad.to_string();
            assert!(validate_config(&config).is_err(), "{bad} should be rejected");
        }
        config.server.page_path = "/spirit/animals".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_token_gate_requires_token() {
        let mut config = free_config();
        config.payment.method = PaymentMethod::Token;
        assert!(validate_config(&config).is_err());

        config.payment.token = Some(String::new());
        assert!(validate_config(&config).is_err());

        config.payment.token = Some("settled".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_price() {
        let mut config = free_config();
        for bad in ["0.001", "$", "$abc", "$0", "$-1"] {
            config.payment.price = bad.to_string();
            assert!(validate_config(&config).is_err(), "{bad} should be rejected");
        }
        config.payment.price = "$0.25".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
