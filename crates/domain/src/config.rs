//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AUTHORIZATION_ENDPOINT, DEFAULT_BIND_ADDR, DEFAULT_ENVIRONMENT, DEFAULT_GRAPHQL_URL,
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MINOR_VERSION, DEFAULT_PAGES_DIR, DEFAULT_REST_BASE_URL,
    DEFAULT_TOKEN_ENDPOINT,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub oauth: OAuthSettings,
    pub accounting: AccountingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Directory holding `index.html` and the `/pages/*` assets.
    pub pages_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: DEFAULT_BIND_ADDR.to_string(), pages_dir: DEFAULT_PAGES_DIR.to_string() }
    }
}

/// OAuth client registration with the accounting platform.
///
/// Credentials are optional at load time: the login and callback endpoints
/// report what is missing instead of refusing to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthSettings {
    pub client_id: Option<String>,
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub environment: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            authorization_endpoint: DEFAULT_AUTHORIZATION_ENDPOINT.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
        }
    }
}

/// Upstream REST and GraphQL endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountingConfig {
    pub rest_base_url: String,
    pub graphql_url: String,
    pub minor_version: u32,
    pub timeout_seconds: u64,
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            rest_base_url: DEFAULT_REST_BASE_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            minor_version: DEFAULT_MINOR_VERSION,
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}
