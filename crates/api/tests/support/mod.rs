#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use qbo_bridge_api::{app, AppContext};
use qbo_bridge_domain::{AccountingConfig, Config, OAuthSettings, ServerConfig};
use qbo_bridge_infra::quickbooks::StoredToken;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::MockServer;

pub const REALM: &str = "9130";

/// Configuration pointing every upstream at `server`.
pub fn config(server: &MockServer, pages_dir: &Path) -> Config {
    Config {
        server: ServerConfig {
            pages_dir: pages_dir.display().to_string(),
            ..ServerConfig::default()
        },
        oauth: OAuthSettings {
            client_id: Some("client".to_string()),
            client_secret: Some("secret".to_string()),
            redirect_uri: Some("http://localhost:8080/api/auth/callback".to_string()),
            token_endpoint: format!("{}/token", server.uri()),
            ..OAuthSettings::default()
        },
        accounting: AccountingConfig {
            rest_base_url: server.uri(),
            graphql_url: format!("{}/graphql", server.uri()),
            ..AccountingConfig::default()
        },
    }
}

pub fn context(config: Config) -> Arc<AppContext> {
    Arc::new(AppContext::new(config).unwrap())
}

pub async fn sign_in(ctx: &AppContext) {
    ctx.tokens
        .set(StoredToken {
            access_token: Some("access".to_string()),
            refresh_token: Some("refresh".to_string()),
            expires_at: chrono::Utc::now().timestamp() + 3600,
            realm_id: Some(REALM.to_string()),
            raw: json!({}),
        })
        .await;
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }

    pub fn location(&self) -> &str {
        self.headers.get(header::LOCATION).unwrap().to_str().unwrap()
    }
}

pub async fn send(ctx: &Arc<AppContext>, request: Request<Body>) -> TestResponse {
    let response = app(ctx.clone()).oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

    TestResponse { status, headers, body }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
