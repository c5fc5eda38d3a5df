//! # Item Routes
//!
//! - `POST /api/quickbook/items`      - create (`type` defaults to `Service`)
//! - `GET  /api/quickbook/items/{id}` - read
//! - `PUT  /api/quickbook/items/{id}` - sparse update

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use qbo_bridge_domain::Entity;
use serde_json::Value;

use crate::context::SharedContext;
use crate::error::{AppError, OperationResultExt};
use crate::extractors::{custom_fields, object_body, object_param, string_param};

const DEFAULT_ITEM_TYPE: &str = "Service";

pub fn router() -> Router<SharedContext> {
    Router::new()
        .route("/api/quickbook/items", post(create_item))
        .route("/api/quickbook/items/{id}", get(get_item).put(update_item))
}

async fn get_item(
    State(ctx): State<SharedContext>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let data =
        ctx.accounting.get_entity(Entity::Item, &id).await.or_failure("Failed to fetch item")?;
    Ok(Json(data))
}

async fn create_item(
    State(ctx): State<SharedContext>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body = object_body(&body);

    let name = string_param(&body, "name");
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let item_type = match body.get("type") {
        None | Some(Value::Null) => DEFAULT_ITEM_TYPE.to_string(),
        Some(_) => string_param(&body, "type"),
    };

    let data = ctx
        .accounting
        .create_item(
            &name,
            &item_type,
            &custom_fields(&body),
            object_param(&body, "additionalData"),
        )
        .await
        .or_failure("Failed to create item")?;

    Ok(Json(data))
}

async fn update_item(
    State(ctx): State<SharedContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body = object_body(&body);

    let data = ctx
        .accounting
        .update_entity(
            Entity::Item,
            &id,
            &custom_fields(&body),
            object_param(&body, "additionalData"),
        )
        .await
        .or_failure("Failed to update item")?;

    Ok(Json(data))
}
