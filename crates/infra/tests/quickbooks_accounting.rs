//! End-to-end accounting flows against a mocked QuickBooks company
//!
//! One `MockServer` stands in for both the GraphQL schema endpoint and the
//! REST entity endpoints.

use std::sync::Arc;

use qbo_bridge_domain::{AccountingConfig, BridgeError, CandidateField, Entity, LineItemInput};
use qbo_bridge_infra::http::HttpClient;
use qbo_bridge_infra::quickbooks::{
    AccountingClient, CostOfFuelInvoice, CustomFieldValidationService, CustomFieldsClient,
    DefinitionCache, StoredToken, TokenStore,
};
use serde_json::{json, Map, Value};
use wiremock::matchers::{
    body_partial_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPANY: &str = "/v3/company/9130";

struct Harness {
    server: MockServer,
    client: AccountingClient,
}

async fn harness() -> Harness {
    let server = MockServer::start().await;

    let tokens = Arc::new(TokenStore::new());
    tokens
        .set(StoredToken {
            access_token: Some("access".to_string()),
            refresh_token: Some("refresh".to_string()),
            expires_at: chrono::Utc::now().timestamp() + 3600,
            realm_id: Some("9130".to_string()),
            raw: json!({}),
        })
        .await;

    let config = AccountingConfig {
        rest_base_url: server.uri(),
        graphql_url: format!("{}/graphql", server.uri()),
        ..AccountingConfig::default()
    };

    let client = accounting_client(&config, tokens);

    Harness { server, client }
}

fn accounting_client(config: &AccountingConfig, tokens: Arc<TokenStore>) -> AccountingClient {
    let http = HttpClient::new().unwrap();
    let fields =
        Arc::new(CustomFieldsClient::new(&config.graphql_url, http.clone(), tokens.clone()));
    let cache = Arc::new(DefinitionCache::new(fields));
    let validation = Arc::new(CustomFieldValidationService::new(cache));
    AccountingClient::new(config, http, tokens, validation)
}

async fn mount_schema(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"appFoundationsCustomFieldDefinitions": {"edges": [
                {"node": {
                    "id": "a", "legacyIDV2": "1", "label": "Fuel",
                    "dataType": "NUMBER", "active": true
                }},
                {"node": {
                    "id": "b", "legacyIDV2": "2", "label": "Colour",
                    "dataType": "DROPDOWN", "active": true,
                    "dropDownOptions": [
                        {"id": "o1", "value": "Red", "active": true, "order": 1},
                        {"id": "o2", "value": "Blue", "active": true, "order": 2}
                    ]}},
                {"node": {
                    "id": "c", "legacyIDV2": "3", "label": "Old",
                    "dataType": "STRING", "active": false
                }}
            ]}}
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[tokio::test]
async fn create_customer_posts_corrected_custom_fields() {
    let Harness { server, client } = harness().await;
    mount_schema(&server, 1).await;

    Mock::given(method("POST"))
        .and(path(format!("{COMPANY}/customer")))
        .and(query_param("minorversion", "75"))
        .and(query_param("include", "enhancedAllCustomFields"))
        .and(header("authorization", "Bearer access"))
        .and(body_partial_json(json!({
            "DisplayName": "Acme Haulage",
            "CompanyName": "Acme",
            "CustomField": [
                {"DefinitionId": "1", "NumberValue": 42.5},
                {"DefinitionId": "2", "StringValue": "Blue"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Customer": {"Id": "58", "DisplayName": "Acme Haulage"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fields = vec![
        CandidateField::new("1", json!("42.5")).with_type("STRING"),
        CandidateField::new("2", json!("Blue")),
    ];

    let created = client
        .create_customer("Acme Haulage", &fields, object(json!({"CompanyName": "Acme"})))
        .await
        .unwrap();

    assert_eq!(created["Customer"]["Id"], json!("58"));
}

#[tokio::test]
async fn invalid_custom_fields_never_reach_the_entity_endpoint() {
    let Harness { server, client } = harness().await;
    mount_schema(&server, 1).await;

    Mock::given(method("POST"))
        .and(path(format!("{COMPANY}/invoice")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let lines = vec![LineItemInput {
        item_id: Some("5".to_string()),
        amount: json!(10),
        quantity: None,
        description: None,
    }];
    let fields = vec![
        CandidateField::new("2", json!("Green")),
        CandidateField::new("3", json!("x")),
    ];

    let err = client.create_invoice("58", &lines, &fields, Map::new()).await.unwrap_err();

    match err {
        BridgeError::CustomFieldValidation(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors[0].starts_with("Field 2: Value 'Green' is not a valid dropdown option"));
            assert_eq!(errors[1], "Field 3: Custom field definition is not active");
        }
        other => panic!("expected custom field validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn update_reads_sync_token_then_posts_sparse_body() {
    let Harness { server, client } = harness().await;
    mount_schema(&server, 1).await;

    Mock::given(method("GET"))
        .and(path(format!("{COMPANY}/item/7")))
        .and(query_param("minorversion", "75"))
        .and(query_param_is_missing("include"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Item": {"Id": "7", "SyncToken": "3", "Name": "Diesel"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{COMPANY}/item")))
        .and(body_partial_json(json!({
            "Id": "7",
            "SyncToken": "3",
            "sparse": true,
            "CustomField": [{"DefinitionId": "1", "NumberValue": 9.0}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Item": {"Id": "7", "SyncToken": "4"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fields = vec![CandidateField::new("1", json!(9))];
    let updated = client
        .update_entity(Entity::Item, "7", &fields, object(json!({"sparse": true})))
        .await
        .unwrap();

    assert_eq!(updated["Item"]["SyncToken"], json!("4"));
}

#[tokio::test]
async fn create_item_without_custom_fields_posts_plain_body() {
    let Harness { server, client } = harness().await;
    mount_schema(&server, 0).await;

    Mock::given(method("POST"))
        .and(path(format!("{COMPANY}/item")))
        .and(body_partial_json(json!({"Name": "Diesel", "Type": "Service"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Item": {"Id": "12", "Name": "Diesel"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_item("Diesel", "Service", &[], Map::new()).await.unwrap();
    assert_eq!(created["Item"]["Id"], json!("12"));

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("CustomField").is_none());
}

#[tokio::test]
async fn update_without_custom_fields_skips_schema() {
    let Harness { server, client } = harness().await;
    mount_schema(&server, 0).await;

    Mock::given(method("GET"))
        .and(path(format!("{COMPANY}/customer/58")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Customer": {"Id": "58", "SyncToken": "0"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{COMPANY}/customer")))
        .and(body_partial_json(json!({"Id": "58", "SyncToken": "0", "Notes": "night shift"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Customer": {"Id": "58", "SyncToken": "1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client
        .update_entity(Entity::Customer, "58", &[], object(json!({"Notes": "night shift"})))
        .await
        .unwrap();

    assert_eq!(updated["Customer"]["SyncToken"], json!("1"));
}

#[tokio::test]
async fn update_without_sync_token_is_rejected() {
    let Harness { server, client } = harness().await;

    Mock::given(method("GET"))
        .and(path(format!("{COMPANY}/customer/58")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Customer": {"Id": "58"}})))
        .mount(&server)
        .await;

    let err = client.update_entity(Entity::Customer, "58", &[], Map::new()).await.unwrap_err();

    assert_eq!(err, BridgeError::Upstream("Could not retrieve customer SyncToken".to_string()));
}

#[tokio::test]
async fn update_guard_runs_before_any_request() {
    let Harness { server, client } = harness().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .update_entity(Entity::Customer, "58", &[], object(json!({"SyncToken": "1"})))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BridgeError::InvalidInput(
            "SyncToken should not be in additionalData. This field is managed internally."
                .to_string()
        )
    );
}

#[tokio::test]
async fn fault_bodies_become_upstream_errors() {
    let Harness { server, client } = harness().await;

    Mock::given(method("GET"))
        .and(path(format!("{COMPANY}/customer/404")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "Fault": {"Error": [{"Message": "Object Not Found"}], "type": "ValidationFault"}
        })))
        .mount(&server)
        .await;

    let err = client.get_entity(Entity::Customer, "404").await.unwrap_err();

    match err {
        BridgeError::Upstream(message) => {
            assert!(message.starts_with("QBO error: "));
            assert!(message.contains("Object Not Found"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn cost_of_fuel_invoice_skips_schema_lookup() {
    let Harness { server, client } = harness().await;
    mount_schema(&server, 0).await;

    Mock::given(method("POST"))
        .and(path(format!("{COMPANY}/invoice")))
        .and(body_partial_json(json!({
            "Line": [{
                "Amount": 100.0,
                "DetailType": "SalesItemLineDetail",
                "SalesItemLineDetail": {"ItemRef": {"value": "5"}}
            }],
            "CustomerRef": {"value": "58"},
            "CustomField": [{"DefinitionId": "99", "NumberValue": 12.5}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Invoice": {"Id": "130"}})))
        .expect(1)
        .mount(&server)
        .await;

    let invoice = CostOfFuelInvoice {
        definition_id: "99".to_string(),
        customer_id: "58".to_string(),
        item_id: "5".to_string(),
        fuel_cost: 12.5,
        field_type: "NUMBER".to_string(),
    };

    let created = client.create_invoice_with_cost_of_fuel(&invoice).await.unwrap();

    assert_eq!(created["Invoice"]["Id"], json!("130"));
}

#[tokio::test]
async fn signed_out_store_rejects_entity_calls() {
    let server = MockServer::start().await;
    let config = AccountingConfig { rest_base_url: server.uri(), ..AccountingConfig::default() };
    let client = accounting_client(&config, Arc::new(TokenStore::new()));

    let err = client.get_entity(Entity::Invoice, "1").await.unwrap_err();

    assert_eq!(err, BridgeError::Auth("Not authenticated".to_string()));
}
