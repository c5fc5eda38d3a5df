/// QuickBooks Online integration
///
/// # Architecture
///
/// - **Auth**: `OAuthClient` - authorization URL, state check, code exchange
/// - **Tokens**: `TokenStore` - in-memory token, the `SessionProvider` for the clients below
/// - **Custom fields**: `CustomFieldsClient` - GraphQL definition management
/// - **Cache**: `DefinitionCache` - schema snapshot keyed by `legacyIDV2`
/// - **Validation**: `CustomFieldValidationService` - validate, correct, build payloads
/// - **Accounting**: `AccountingClient` - customer, item and invoice REST calls
///
/// # Usage
///
/// ```no_run
/// use std::sync::Arc;
/// use qbo_bridge_domain::AccountingConfig;
/// use qbo_bridge_infra::http::HttpClient;
/// use qbo_bridge_infra::integrations::quickbooks::{
///     AccountingClient, CustomFieldValidationService, CustomFieldsClient, DefinitionCache,
///     TokenStore,
/// };
///
/// # async fn example() -> qbo_bridge_domain::Result<()> {
/// let config = AccountingConfig::default();
/// let http = HttpClient::new()?;
/// let tokens = Arc::new(TokenStore::new());
///
/// let fields =
///     Arc::new(CustomFieldsClient::new(&config.graphql_url, http.clone(), tokens.clone()));
/// let cache = Arc::new(DefinitionCache::new(fields));
/// let validation = Arc::new(CustomFieldValidationService::new(cache));
/// let accounting = AccountingClient::new(&config, http, tokens, validation);
///
/// let customer = accounting.get_entity(qbo_bridge_domain::Entity::Customer, "58").await?;
/// # Ok(())
/// # }
/// ```
pub mod accounting;
pub mod auth;
pub mod cache;
pub mod custom_fields;
pub mod queries;
pub mod token_store;
pub mod validation;

pub use accounting::{AccountingClient, CostOfFuelInvoice};
pub use auth::{OAuthClient, OAuthClientError};
pub use cache::DefinitionCache;
pub use custom_fields::{parse_definitions, CustomFieldsClient};
pub use token_store::{Session, SessionProvider, StoredToken, TokenStore};
pub use validation::CustomFieldValidationService;
