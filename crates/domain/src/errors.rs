//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for qbo-bridge
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One or more custom fields were rejected against the remote schema.
    ///
    /// Carries the ordered error list verbatim so the request layer can hand
    /// it back to the caller.
    #[error("Custom field validation failed: {}", .0.join("; "))]
    CustomFieldValidation(Vec<String>),

    /// The accounting platform answered, but with a fault or GraphQL error.
    #[error("{0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Stable label suitable for structured log fields.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::CustomFieldValidation(_) => "custom_field_validation",
            Self::Upstream(_) => "upstream",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for qbo-bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
