use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub payment: PaymentConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the interactive page's static build
    #[serde(default = "default_page_dir")]
    pub page_dir: PathBuf,
    /// Path browsers are redirected to when they navigate to the API directly
    #[serde(default = "default_page_path")]
    pub page_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            page_dir: default_page_dir(),
            page_path: default_page_path(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_page_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_page_path() -> String {
    "/animals".to_string()
}

/// Payment gate configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentConfig {
    pub method: PaymentMethod,
    /// Settlement token accepted by the `token` gate
    #[serde(default)]
    pub token: Option<String>,
    /// Price per call, e.g. "$0.001"
    #[serde(default = "default_price")]
    pub price: String,
    #[serde(default = "default_network")]
    pub network: String,
    /// Receiver address advertised in payment requirements
    #[serde(default)]
    pub pay_to: Option<String>,
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_price() -> String {
    "$0.001".to_string()
}

fn default_network() -> String {
    "solana-devnet".to_string()
}

fn default_description() -> String {
    "Get a random animal based on character repetition".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Every call is let through
    None,
    /// Calls must carry the configured settlement token
    Token,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::None => "none",
            PaymentMethod::Token => "token",
        }
    }
}

/// Dataset configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/animals.json")
}

/// Matcher configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MatcherConfig {
    /// Seed for reproducible tie-breaks. Unset means thread-local randomness.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub payment: SanitizedPaymentConfig,
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub matcher: MatcherConfig,
}

/// Sanitized payment config (settlement token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedPaymentConfig {
    pub method: String,
    pub token_configured: bool,
    pub price: String,
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_to: Option<String>,
    pub description: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let payment = &config.payment;
        Self {
            payment: SanitizedPaymentConfig {
                method: payment.method.as_str().to_string(),
                token_configured: payment.token.as_ref().is_some_and(|t| !t.is_empty()),
                price: payment.price.clone(),
                network: payment.network.clone(),
                pay_to: payment.pay_to.clone(),
                description: payment.description.clone(),
            },
            server: config.server.clone(),
            dataset: config.dataset.clone(),
            matcher: config.matcher.clone(),
        }
    }
}
