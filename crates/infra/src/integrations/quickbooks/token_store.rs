//! In-process OAuth token storage
//!
//! A single company connection is held in memory for the life of the
//! process. Nothing is persisted; a restart requires a fresh login.

use async_trait::async_trait;
use chrono::Utc;
use qbo_bridge_domain::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

/// Token material captured from the OAuth callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) after which the access token is rejected.
    pub expires_at: i64,
    pub realm_id: Option<String>,
    /// Untouched token endpoint response.
    pub raw: Value,
}

impl StoredToken {
    /// A token is usable while it has a non-empty access token and has not
    /// reached `expires_at`.
    pub fn is_valid_at(&self, now: i64) -> bool {
        let has_access_token = self.access_token.as_deref().is_some_and(|token| !token.is_empty());
        has_access_token && now < self.expires_at
    }
}

/// Credentials needed to call the accounting APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub realm_id: Option<String>,
}

impl Session {
    /// Realm id, required by every REST path.
    pub fn realm(&self) -> Result<&str> {
        self.realm_id
            .as_deref()
            .filter(|realm| !realm.is_empty())
            .ok_or_else(|| BridgeError::Auth("Missing token or realmId".to_string()))
    }
}

/// Provides authenticated sessions to the upstream adapters.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Current session, or `BridgeError::Auth` when not logged in.
    async fn session(&self) -> Result<Session>;
}

/// Process-wide holder for the current token.
#[derive(Debug, Default)]
pub struct TokenStore {
    token: RwLock<Option<StoredToken>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored token.
    pub async fn set(&self, token: StoredToken) {
        *self.token.write().await = Some(token);
    }

    /// Stored token, valid or not.
    pub async fn get(&self) -> Option<StoredToken> {
        self.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        let now = Utc::now().timestamp();
        self.token.read().await.as_ref().is_some_and(|token| token.is_valid_at(now))
    }
}

#[async_trait]
impl SessionProvider for TokenStore {
    async fn session(&self) -> Result<Session> {
        let now = Utc::now().timestamp();
        let guard = self.token.read().await;

        match guard.as_ref() {
            Some(token) if token.is_valid_at(now) => Ok(Session {
                access_token: token.access_token.clone().unwrap_or_default(),
                realm_id: token.realm_id.clone(),
            }),
            _ => Err(BridgeError::Auth("Not authenticated".to_string())),
        }
    }
}
