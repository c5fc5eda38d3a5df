//! OAuth 2.0 authorization-code client for the accounting platform
//!
//! Handles the browser-based flow:
//! - Authorization URL building with a random `state`
//! - State bookkeeping for callback validation
//! - Authorization code exchange (HTTP Basic client authentication)

use std::collections::VecDeque;
use std::time::Duration;

use chrono::Utc;
use qbo_bridge_domain::constants::{DEFAULT_TOKEN_LIFETIME_SECS, OAUTH_SCOPES};
use qbo_bridge_domain::{BridgeError, OAuthSettings};
use rand::Rng;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::token_store::StoredToken;

/// Issued states kept for callback validation; older ones are forgotten.
const MAX_PENDING_STATES: usize = 64;

/// Error type for OAuth client operations
#[derive(Debug, Error)]
pub enum OAuthClientError {
    /// Required client registration values are missing.
    #[error("{0}")]
    NotConfigured(&'static str),

    /// Callback carried a state this process never issued, or already used.
    #[error("Invalid OAuth state")]
    UnknownState,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Token endpoint answered with a non-success status
    #[error("Token endpoint returned HTTP {status}: {body}")]
    TokenEndpoint { status: u16, body: String },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl From<OAuthClientError> for BridgeError {
    fn from(err: OAuthClientError) -> Self {
        match err {
            OAuthClientError::NotConfigured(message) => BridgeError::Config(message.to_string()),
            OAuthClientError::UnknownState => {
                BridgeError::InvalidInput("Invalid OAuth state".to_string())
            }
            other => BridgeError::Auth(other.to_string()),
        }
    }
}

pub const LOGIN_NOT_CONFIGURED: &str = "CLIENT_ID or REDIRECT_URI not set in environment.";
pub const CALLBACK_NOT_CONFIGURED: &str = "CLIENT_ID or CLIENT_SECRET not configured.";

/// OAuth 2.0 client for the authorization-code grant.
pub struct OAuthClient {
    settings: OAuthSettings,
    client: Client,
    pending_states: Mutex<VecDeque<String>>,
}

impl OAuthClient {
    /// Create a new OAuth client with the given registration.
    pub fn new(settings: OAuthSettings, timeout: Duration) -> Result<Self, OAuthClientError> {
        let client = Client::builder().timeout(timeout).no_proxy().build()?;
        Ok(Self { settings, client, pending_states: Mutex::new(VecDeque::new()) })
    }

    /// Build the authorization URL the browser is redirected to.
    ///
    /// # Returns
    /// Tuple of (authorization_url, state); the state is remembered until a
    /// callback consumes it.
    pub async fn authorization_url(&self) -> Result<(String, String), OAuthClientError> {
        let (client_id, redirect_uri) =
            match (non_empty(&self.settings.client_id), non_empty(&self.settings.redirect_uri)) {
                (Some(client_id), Some(redirect_uri)) => (client_id, redirect_uri),
                _ => return Err(OAuthClientError::NotConfigured(LOGIN_NOT_CONFIGURED)),
            };

        let state = generate_state();
        {
            let mut pending = self.pending_states.lock().await;
            pending.push_back(state.clone());
            while pending.len() > MAX_PENDING_STATES {
                pending.pop_front();
            }
        }

        let scope = OAUTH_SCOPES.join(" ");
        let params = [
            ("client_id", client_id),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("redirect_uri", redirect_uri),
            ("state", state.as_str()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!("{}?{}", self.settings.authorization_endpoint, query_string);
        debug!(state = %state, "Issued OAuth authorization URL");

        Ok((url, state))
    }

    /// Accept a callback state exactly once.
    pub async fn consume_state(&self, state: &str) -> Result<(), OAuthClientError> {
        let mut pending = self.pending_states.lock().await;
        match pending.iter().position(|issued| issued == state) {
            Some(index) => {
                pending.remove(index);
                Ok(())
            }
            None => Err(OAuthClientError::UnknownState),
        }
    }

    /// Exchange an authorization code for tokens.
    ///
    /// `expires_at` is computed from `expires_in`, defaulting to one hour
    /// when the endpoint omits it.
    pub async fn exchange_code(
        &self,
        code: &str,
        realm_id: Option<String>,
    ) -> Result<StoredToken, OAuthClientError> {
        let (client_id, client_secret) =
            match (non_empty(&self.settings.client_id), non_empty(&self.settings.client_secret)) {
                (Some(client_id), Some(client_secret)) => (client_id, client_secret),
                _ => return Err(OAuthClientError::NotConfigured(CALLBACK_NOT_CONFIGURED)),
            };

        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.settings.redirect_uri.as_deref().unwrap_or_default()),
        ];

        let response = self
            .client
            .post(&self.settings.token_endpoint)
            .basic_auth(client_id, Some(client_secret))
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthClientError::TokenEndpoint { status: status.as_u16(), body });
        }

        let raw: Value =
            response.json().await.map_err(|e| OAuthClientError::ParseError(e.to_string()))?;

        let token = token_from_response(raw, realm_id, Utc::now().timestamp());
        info!(realm_id = token.realm_id.as_deref().unwrap_or(""), "OAuth code exchanged");

        Ok(token)
    }
}

fn token_from_response(raw: Value, realm_id: Option<String>, now: i64) -> StoredToken {
    let expires_in = match &raw["expires_in"] {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
    .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);

    StoredToken {
        access_token: raw["access_token"].as_str().map(str::to_string),
        refresh_token: raw["refresh_token"].as_str().map(str::to_string),
        expires_at: now + expires_in,
        realm_id,
        raw,
    }
}

/// 16 hex characters from 8 random bytes.
fn generate_state() -> String {
    let bytes: [u8; 8] = rand::thread_rng().gen();
    hex::encode(bytes)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
