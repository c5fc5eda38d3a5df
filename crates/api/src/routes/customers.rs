//! # Customer Routes
//!
//! - `POST /api/quickbook/customers`      - create
//! - `GET  /api/quickbook/customers/{id}` - read
//! - `PUT  /api/quickbook/customers/{id}` - sparse update

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use qbo_bridge_domain::Entity;
use serde_json::Value;

use crate::context::SharedContext;
use crate::error::{AppError, OperationResultExt};
use crate::extractors::{custom_fields, object_body, object_param, string_param};

pub fn router() -> Router<SharedContext> {
    Router::new()
        .route("/api/quickbook/customers", post(create_customer))
        .route("/api/quickbook/customers/{id}", get(get_customer).put(update_customer))
}

async fn get_customer(
    State(ctx): State<SharedContext>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let data = ctx
        .accounting
        .get_entity(Entity::Customer, &id)
        .await
        .or_failure("Failed to fetch customer")?;
    Ok(Json(data))
}

async fn create_customer(
    State(ctx): State<SharedContext>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body = object_body(&body);

    let display_name = string_param(&body, "displayName");
    if display_name.is_empty() {
        return Err(AppError::BadRequest("displayName is required".to_string()));
    }

    let data = ctx
        .accounting
        .create_customer(
            &display_name,
            &custom_fields(&body),
            object_param(&body, "additionalData"),
        )
        .await
        .or_failure("Failed to create customer")?;

    Ok(Json(data))
}

async fn update_customer(
    State(ctx): State<SharedContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body = object_body(&body);

    let data = ctx
        .accounting
        .update_entity(
            Entity::Customer,
            &id,
            &custom_fields(&body),
            object_param(&body, "additionalData"),
        )
        .await
        .or_failure("Failed to update customer")?;

    Ok(Json(data))
}
