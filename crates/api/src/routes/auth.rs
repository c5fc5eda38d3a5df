//! # OAuth Routes
//!
//! - `GET  /api/auth/login`         - redirect to the authorization page
//! - `GET  /api/auth/callback`      - exchange the code and store the token
//! - `POST /api/auth/retrieveToken` - return the stored token

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};
use qbo_bridge_infra::quickbooks::OAuthClientError;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::context::SharedContext;
use crate::error::AppError;

pub fn router() -> Router<SharedContext> {
    Router::new()
        .route("/api/auth/login", get(login))
        .route("/api/auth/callback", get(callback))
        .route("/api/auth/retrieveToken", post(retrieve_token))
}

/// Query parameters of the authorization callback.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    #[serde(rename = "realmId")]
    pub realm_id: Option<String>,
    pub state: Option<String>,
}

async fn login(State(ctx): State<SharedContext>) -> Result<Redirect, AppError> {
    let (url, _state) = ctx
        .oauth
        .authorization_url()
        .await
        .map_err(|err| AppError::Text(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;

    Ok(Redirect::to(&url))
}

async fn callback(
    State(ctx): State<SharedContext>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, AppError> {
    let Some(code) = params.code.filter(|code| !code.is_empty()) else {
        return Err(AppError::Text(
            StatusCode::BAD_REQUEST,
            "Missing authorisation code.".to_string(),
        ));
    };

    if let Some(state) = params.state.as_deref().filter(|state| !state.is_empty()) {
        if let Err(err) = ctx.oauth.consume_state(state).await {
            warn!("OAuth callback carried an unknown state");
            return Err(AppError::Text(StatusCode::BAD_REQUEST, err.to_string()));
        }
    }

    let token = ctx.oauth.exchange_code(&code, params.realm_id).await.map_err(|err| match err {
        OAuthClientError::NotConfigured(message) => {
            AppError::Text(StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
        }
        other => AppError::Text(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("OAuth callback error: {other}"),
        ),
    })?;

    ctx.tokens.set(token).await;
    ctx.definitions.invalidate();
    info!("Company connected");

    Ok(Redirect::to("/"))
}

/// The stored token is returned as-is, expired or not.
async fn retrieve_token(State(ctx): State<SharedContext>) -> Result<Json<Value>, AppError> {
    match ctx.tokens.get().await {
        Some(token) => Ok(Json(json!({ "token": token }))),
        None => Err(AppError::Unauthorized),
    }
}
