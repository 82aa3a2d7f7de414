use thiserror::Error;

/// Broad failure categories the calling UI gives distinct guidance for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Payment,
    Server,
    Format,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Network => "network",
            ErrorCategory::Payment => "payment",
            ErrorCategory::Server => "server",
            ErrorCategory::Format => "format",
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Please enter your name")]
    EmptyName,

    #[error("Client configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Payment required: {0}")]
    PaymentRequired(String),

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error(
        "Unexpected response format: expected JSON but got {}",
        .content_type.as_deref().unwrap_or("unknown")
    )]
    UnexpectedFormat { content_type: Option<String> },

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),
}

impl ClientError {
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Network(e.to_string())
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::EmptyName | ClientError::Configuration(_) => ErrorCategory::Input,
            ClientError::Network(_) | ClientError::Timeout => ErrorCategory::Network,
            ClientError::PaymentRequired(_) | ClientError::PaymentFailed(_) => {
                ErrorCategory::Payment
            }
            ClientError::Server { .. } => ErrorCategory::Server,
            ClientError::UnexpectedFormat { .. } | ClientError::InvalidJson(_) => {
                ErrorCategory::Format
            }
        }
    }

    /// Message suitable for showing to the visitor.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::EmptyName => "Please enter your name".to_string(),
            ClientError::Configuration(_) => {
                "The client is misconfigured. Check the service URL.".to_string()
            }
            ClientError::Network(_) | ClientError::Timeout => {
                "Network error: failed to connect to the server. Make sure the API is accessible."
                    .to_string()
            }
            ClientError::PaymentRequired(_) | ClientError::PaymentFailed(_) => {
                "Payment is required but was not completed. Check your wallet and try again."
                    .to_string()
            }
            ClientError::Server { status, body } if body.is_empty() => {
                format!("Error {}: the server could not complete the request.", status)
            }
            ClientError::Server { status, body } => format!("Error {}: {}", status, body),
            ClientError::UnexpectedFormat { content_type } => format!(
                "Unexpected response format. Expected JSON but got {}.",
                content_type.as_deref().unwrap_or("unknown")
            ),
            ClientError::InvalidJson(_) => "Invalid JSON response from the server.".to_string(),
        }
    }
}
