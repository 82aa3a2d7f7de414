pub mod client;
pub mod config;
pub mod dataset;
pub mod matcher;
pub mod metrics;
pub mod negotiation;
pub mod payment;
pub mod response;
pub mod testing;

pub use client::{
    AnimalClient, ClientConfig, ClientError, ErrorCategory, PaymentChallenge, PaymentHandler,
    PaymentSession,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, PaymentMethod,
    SanitizedConfig,
};
pub use dataset::{load_dataset, AnimalRecord, Dataset, DatasetError};
pub use matcher::{MatchError, MatchResult, Matcher, TieBreaker};
pub use negotiation::{classify, Classification, RequestSignals};
pub use payment::{
    create_payment_gate, FreeGate, PaymentDecision, PaymentError, PaymentGate, PaymentRequest,
    PaymentRequiredBody, PaymentRequirement, TokenGate,
};
pub use response::{resolve_origin, AllowedOrigin, AnimalResponse, ErrorBody, OriginHints};
