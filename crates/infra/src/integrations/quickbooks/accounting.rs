//! REST client for accounting entities
//!
//! Customers, items and invoices live under
//! `{base}/v3/company/{realm}/{entity}`. Every create/update runs the
//! caller's custom fields through [`CustomFieldValidationService`] before the
//! body is assembled; the cost-of-fuel invoice is the one path that builds
//! its field directly.

use std::sync::Arc;

use qbo_bridge_core::build;
use qbo_bridge_core::entities::{
    cost_of_fuel_body, customer_create_body, guard_create_data, guard_update_data,
    invoice_create_body, item_create_body, update_body, Body,
};
use qbo_bridge_domain::{
    AccountingConfig, BridgeError, CandidateField, Entity, LineItemInput, Result,
};
use reqwest::{Method, RequestBuilder};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::token_store::{Session, SessionProvider};
use super::validation::CustomFieldValidationService;
use crate::errors::conversions::http_error;
use crate::http::HttpClient;

const INCLUDE_CUSTOM_FIELDS: &str = "enhancedAllCustomFields";

/// Parameters of the fixed single-line fuel invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct CostOfFuelInvoice {
    pub definition_id: String,
    pub customer_id: String,
    pub item_id: String,
    pub fuel_cost: f64,
    pub field_type: String,
}

/// QuickBooks accounting REST client
pub struct AccountingClient {
    base_url: String,
    minor_version: u32,
    http_client: HttpClient,
    sessions: Arc<dyn SessionProvider>,
    validation: Arc<CustomFieldValidationService>,
}

impl AccountingClient {
    pub fn new(
        config: &AccountingConfig,
        http_client: HttpClient,
        sessions: Arc<dyn SessionProvider>,
        validation: Arc<CustomFieldValidationService>,
    ) -> Self {
        Self {
            base_url: config.rest_base_url.trim_end_matches('/').to_string(),
            minor_version: config.minor_version,
            http_client,
            sessions,
            validation,
        }
    }

    /// Read one entity by id.
    pub async fn get_entity(&self, entity: Entity, id: &str) -> Result<Value> {
        let session = self.sessions.session().await?;
        let url = self.entity_url(&session, entity, Some(id))?;

        let builder = self.authorized(&session, Method::GET, &url, true);
        self.execute(builder, "QBO error").await
    }

    pub async fn create_customer(
        &self,
        display_name: &str,
        custom_fields: &[CandidateField],
        additional: Body,
    ) -> Result<Value> {
        let session = self.sessions.session().await?;
        guard_create_data(Entity::Customer, &additional)?;

        let payloads = self.validation.prepare_payloads(custom_fields).await?;
        let body = customer_create_body(display_name, &payloads, additional);

        info!(custom_fields = payloads.len(), "Creating customer");
        self.post(&session, Entity::Customer, body).await
    }

    pub async fn create_item(
        &self,
        name: &str,
        item_type: &str,
        custom_fields: &[CandidateField],
        additional: Body,
    ) -> Result<Value> {
        let session = self.sessions.session().await?;
        guard_create_data(Entity::Item, &additional)?;

        let payloads = self.validation.prepare_payloads(custom_fields).await?;
        let body = item_create_body(name, item_type, &payloads, additional);

        info!(item_type, custom_fields = payloads.len(), "Creating item");
        self.post(&session, Entity::Item, body).await
    }

    pub async fn create_invoice(
        &self,
        customer_id: &str,
        lines: &[LineItemInput],
        custom_fields: &[CandidateField],
        additional: Body,
    ) -> Result<Value> {
        let session = self.sessions.session().await?;
        guard_create_data(Entity::Invoice, &additional)?;

        let payloads = self.validation.prepare_payloads(custom_fields).await?;
        let body = invoice_create_body(customer_id, lines, &payloads, additional)?;

        info!(lines = lines.len(), custom_fields = payloads.len(), "Creating invoice");
        self.post(&session, Entity::Invoice, body).await
    }

    /// Sparse update of an existing entity.
    ///
    /// The current `SyncToken` is read from the entity first; the update is
    /// rejected when none comes back.
    pub async fn update_entity(
        &self,
        entity: Entity,
        id: &str,
        custom_fields: &[CandidateField],
        additional: Body,
    ) -> Result<Value> {
        let session = self.sessions.session().await?;
        guard_update_data(&additional)?;

        let sync_token = self.fetch_sync_token(&session, entity, id).await?;
        let payloads = self.validation.prepare_payloads(custom_fields).await?;
        let body = update_body(id, sync_token, &payloads, additional);

        info!(entity = entity.resource(), custom_fields = payloads.len(), "Updating entity");
        self.post(&session, entity, body).await
    }

    /// Invoice with a single fixed line and one custom field.
    ///
    /// The field is built straight from `fuel_cost`; no schema lookup happens.
    pub async fn create_invoice_with_cost_of_fuel(
        &self,
        invoice: &CostOfFuelInvoice,
    ) -> Result<Value> {
        let session = self.sessions.session().await?;

        let payload = build(&invoice.definition_id, &json!(invoice.fuel_cost), &invoice.field_type);
        let body = cost_of_fuel_body(&invoice.customer_id, &invoice.item_id, &payload);

        info!(definition_id = %invoice.definition_id, "Creating cost-of-fuel invoice");
        self.post(&session, Entity::Invoice, body).await
    }

    async fn fetch_sync_token(&self, session: &Session, entity: Entity, id: &str) -> Result<Value> {
        let url = self.entity_url(session, entity, Some(id))?;
        let builder = self.authorized(session, Method::GET, &url, false);

        let prefix = format!("QBO error fetching {}", entity.resource());
        let existing = self.execute(builder, &prefix).await?;

        match existing.get(entity.response_key()).and_then(|record| record.get("SyncToken")) {
            Some(token) if !token.is_null() => {
                debug!(entity = entity.resource(), sync_token = %token, "Fetched SyncToken");
                Ok(token.clone())
            }
            _ => Err(BridgeError::Upstream(format!(
                "Could not retrieve {} SyncToken",
                entity.resource()
            ))),
        }
    }

    async fn post(&self, session: &Session, entity: Entity, body: Body) -> Result<Value> {
        let url = self.entity_url(session, entity, None)?;
        let builder = self.authorized(session, Method::POST, &url, true).json(&body);
        self.execute(builder, "QBO error").await
    }

    fn entity_url(&self, session: &Session, entity: Entity, id: Option<&str>) -> Result<String> {
        let realm = session.realm()?;
        let mut url = format!(
            "{}/v3/company/{}/{}",
            self.base_url,
            urlencoding::encode(realm),
            entity.resource()
        );
        if let Some(id) = id {
            url.push('/');
            url.push_str(&urlencoding::encode(id));
        }
        Ok(url)
    }

    fn authorized(
        &self,
        session: &Session,
        method: Method,
        url: &str,
        include_custom_fields: bool,
    ) -> RequestBuilder {
        let mut builder = self
            .http_client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", session.access_token))
            .header("Accept", "application/json")
            .query(&[("minorversion", self.minor_version.to_string())]);

        if include_custom_fields {
            builder = builder.query(&[("include", INCLUDE_CUSTOM_FIELDS)]);
        }

        builder
    }

    /// Send and decode; a `Fault` member becomes `"{prefix}: {fault}"`.
    async fn execute(&self, builder: RequestBuilder, fault_prefix: &str) -> Result<Value> {
        let response = self.http_client.send(builder).await?;
        let status = response.status();
        let text = response.text().await.map_err(http_error)?;

        debug!(status = status.as_u16(), "Received accounting response");

        let body: Option<Value> = serde_json::from_str(&text).ok();

        let fault = body.as_ref().and_then(|body| body.get("Fault")).filter(|f| !f.is_null());
        if let Some(fault) = fault {
            return Err(BridgeError::Upstream(format!("{fault_prefix}: {fault}")));
        }

        if !status.is_success() {
            return Err(BridgeError::Upstream(format!(
                "QBO request failed (HTTP {}): {}",
                status.as_u16(),
                text
            )));
        }

        body.ok_or_else(|| {
            BridgeError::Upstream("Failed to parse QBO response as JSON".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use qbo_bridge_domain::AccountingConfig;

    use super::*;
    use crate::integrations::quickbooks::cache::DefinitionCache;

    struct NoDefinitions;

    #[async_trait]
    impl qbo_bridge_core::DefinitionsProvider for NoDefinitions {
        async fn fetch_all(&self) -> Result<Vec<qbo_bridge_domain::CustomFieldDefinition>> {
            Ok(Vec::new())
        }
    }

    struct FixedSession(Option<&'static str>);

    #[async_trait]
    impl SessionProvider for FixedSession {
        async fn session(&self) -> Result<Session> {
            Ok(Session {
                access_token: "token".to_string(),
                realm_id: self.0.map(str::to_string),
            })
        }
    }

    fn client(realm: Option<&'static str>) -> AccountingClient {
        let config = AccountingConfig {
            rest_base_url: "https://qbo.example/".to_string(),
            ..AccountingConfig::default()
        };
        let cache = Arc::new(DefinitionCache::new(Arc::new(NoDefinitions)));
        AccountingClient::new(
            &config,
            HttpClient::new().unwrap(),
            Arc::new(FixedSession(realm)),
            Arc::new(CustomFieldValidationService::new(cache)),
        )
    }

    #[tokio::test]
    async fn entity_urls_encode_realm_and_id() {
        let client = client(Some("123 45"));
        let session = client.sessions.session().await.unwrap();

        let url = client.entity_url(&session, Entity::Customer, Some("a/b")).unwrap();

        assert_eq!(url, "https://qbo.example/v3/company/123%2045/customer/a%2Fb");
    }

    #[tokio::test]
    async fn missing_realm_is_an_auth_error() {
        let client = client(None);

        let err = client.get_entity(Entity::Item, "1").await.unwrap_err();

        assert_eq!(err, BridgeError::Auth("Missing token or realmId".to_string()));
    }
}
