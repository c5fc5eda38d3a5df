//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use qbo_bridge_domain::{Config, Result};
use qbo_bridge_infra::http::HttpClient;
use qbo_bridge_infra::quickbooks::{
    AccountingClient, CustomFieldValidationService, CustomFieldsClient, DefinitionCache,
    OAuthClient, TokenStore,
};
use tracing::info;

/// Shared handle passed to every handler.
pub type SharedContext = Arc<AppContext>;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub tokens: Arc<TokenStore>,
    pub oauth: Arc<OAuthClient>,
    pub custom_fields: Arc<CustomFieldsClient>,
    pub definitions: Arc<DefinitionCache>,
    pub validation: Arc<CustomFieldValidationService>,
    pub accounting: Arc<AccountingClient>,
}

impl AppContext {
    /// Build every service from `config`.
    ///
    /// Missing OAuth credentials are not an error here; the auth endpoints
    /// report them when used.
    pub fn new(config: Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.accounting.timeout_seconds);

        let http_client = HttpClient::builder().timeout(timeout).build()?;
        let tokens = Arc::new(TokenStore::new());
        let oauth = Arc::new(OAuthClient::new(config.oauth.clone(), timeout)?);

        let custom_fields = Arc::new(CustomFieldsClient::new(
            &config.accounting.graphql_url,
            http_client.clone(),
            tokens.clone(),
        ));
        let definitions = Arc::new(DefinitionCache::new(custom_fields.clone()));
        let validation = Arc::new(CustomFieldValidationService::new(definitions.clone()));
        let accounting = Arc::new(AccountingClient::new(
            &config.accounting,
            http_client,
            tokens.clone(),
            validation.clone(),
        ));

        info!(
            environment = %config.oauth.environment,
            rest_base_url = %config.accounting.rest_base_url,
            graphql_url = %config.accounting.graphql_url,
            oauth_configured = config.oauth.client_id.is_some(),
            "Application context initialized"
        );

        Ok(Self { config, tokens, oauth, custom_fields, definitions, validation, accounting })
    }
}
