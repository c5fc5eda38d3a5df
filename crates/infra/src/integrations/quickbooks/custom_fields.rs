//! GraphQL client for custom field definitions
//!
//! Lists, creates and updates definitions through the App Foundations
//! GraphQL API, and serves as the [`DefinitionsProvider`] behind the
//! definition cache.

use std::sync::Arc;

use async_trait::async_trait;
use qbo_bridge_core::DefinitionsProvider;
use qbo_bridge_domain::constants::REALM_ID_HEADER;
use qbo_bridge_domain::{BridgeError, CustomFieldDefinition, Result};
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::queries::{
    create_variables, update_variables, CREATE_DEFINITION, LIST_DEFINITIONS, UPDATE_DEFINITION,
};
use super::token_store::SessionProvider;
use crate::http::HttpClient;

/// Custom field definition client
pub struct CustomFieldsClient {
    graphql_url: String,
    http_client: HttpClient,
    sessions: Arc<dyn SessionProvider>,
}

impl CustomFieldsClient {
    pub fn new(
        graphql_url: impl Into<String>,
        http_client: HttpClient,
        sessions: Arc<dyn SessionProvider>,
    ) -> Self {
        Self { graphql_url: graphql_url.into(), http_client, sessions }
    }

    /// Raw `data` of the list query.
    pub async fn list(&self) -> Result<Value> {
        self.execute_graphql(LIST_DEFINITIONS, json!({})).await
    }

    /// Create a definition; body values overlay the create defaults.
    pub async fn create(&self, body: &Map<String, Value>) -> Result<Value> {
        self.execute_graphql(CREATE_DEFINITION, create_variables(body)).await
    }

    /// Update the definition with remote id `id`.
    pub async fn update(&self, id: &str, body: &Map<String, Value>) -> Result<Value> {
        self.execute_graphql(UPDATE_DEFINITION, update_variables(id, body)).await
    }

    /// Soft delete: definitions are deactivated, never removed.
    pub async fn deactivate(&self, id: &str) -> Result<Value> {
        let mut body = Map::new();
        body.insert("active".to_string(), Value::Bool(false));
        self.update(id, &body).await
    }

    /// Execute a GraphQL query/mutation
    ///
    /// # Returns
    /// The response `data` member, or `{}` when it is absent.
    async fn execute_graphql(&self, query: &str, variables: Value) -> Result<Value> {
        let session = self.sessions.session().await?;

        let request_body = json!({
            "query": query,
            "variables": variables,
        });

        let request_builder = self
            .http_client
            .request(Method::POST, &self.graphql_url)
            .header("Authorization", format!("Bearer {}", session.access_token))
            .header(REALM_ID_HEADER, session.realm_id.as_deref().unwrap_or_default())
            .header("Accept", "application/json")
            .json(&request_body);

        let response = self.http_client.send(request_builder).await?;

        let status = response.status();
        debug!(status = status.as_u16(), "Received custom field GraphQL response");

        let text = response.text().await.map_err(crate::errors::conversions::http_error)?;
        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(BridgeError::Upstream(format!(
                    "GraphQL request failed (HTTP {}): {}",
                    status.as_u16(),
                    text
                )));
            }
            Err(e) => {
                return Err(BridgeError::Upstream(format!(
                    "Failed to parse GraphQL response: {}",
                    e
                )));
            }
        };

        if let Some(errors) = body.get("errors").filter(|errors| !errors.is_null()) {
            return Err(BridgeError::Upstream(format!("GraphQL error: {}", errors)));
        }

        if !status.is_success() {
            return Err(BridgeError::Upstream(format!(
                "GraphQL request failed (HTTP {}): {}",
                status.as_u16(),
                text
            )));
        }

        Ok(body.get("data").filter(|data| !data.is_null()).cloned().unwrap_or_else(|| json!({})))
    }
}

#[async_trait]
impl DefinitionsProvider for CustomFieldsClient {
    async fn fetch_all(&self) -> Result<Vec<CustomFieldDefinition>> {
        let data = self.list().await?;
        Ok(parse_definitions(&data))
    }
}

/// Definitions under `appFoundationsCustomFieldDefinitions.edges[].node`.
///
/// Nodes that do not deserialize are skipped.
pub fn parse_definitions(data: &Value) -> Vec<CustomFieldDefinition> {
    let edges = data
        .pointer("/appFoundationsCustomFieldDefinitions/edges")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    edges
        .iter()
        .filter_map(|edge| edge.get("node"))
        .filter_map(|node| match serde_json::from_value(node.clone()) {
            Ok(definition) => Some(definition),
            Err(e) => {
                warn!(error = %e, "Skipping malformed custom field definition");
                None
            }
        })
        .collect()
}
