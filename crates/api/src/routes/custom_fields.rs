//! # Custom Field Definition Routes
//!
//! - `GET    /api/quickbook/custom-fields`          - list definitions
//! - `POST   /api/quickbook/custom-fields`          - create a definition
//! - `POST   /api/quickbook/custom-fields/validate` - validate a batch
//! - `PUT    /api/quickbook/custom-fields/{id}`     - update a definition
//! - `DELETE /api/quickbook/custom-fields/{id}`     - deactivate a definition
//!
//! Every successful write invalidates the definition cache.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::Value;

use crate::context::SharedContext;
use crate::error::{AppError, OperationResultExt};
use crate::extractors::{custom_fields, object_body};

pub fn router() -> Router<SharedContext> {
    Router::new()
        .route("/api/quickbook/custom-fields", get(list_definitions).post(create_definition))
        .route("/api/quickbook/custom-fields/validate", post(validate_fields))
        .route(
            "/api/quickbook/custom-fields/{id}",
            put(update_definition).delete(delete_definition),
        )
}

async fn list_definitions(State(ctx): State<SharedContext>) -> Result<Json<Value>, AppError> {
    let data = ctx.custom_fields.list().await.or_failure("Failed to fetch custom fields")?;
    Ok(Json(data))
}

async fn create_definition(
    State(ctx): State<SharedContext>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body = object_body(&body);
    let data = ctx.custom_fields.create(&body).await.or_failure("Failed to create custom field")?;

    ctx.definitions.invalidate();
    Ok(Json(data))
}

async fn update_definition(
    State(ctx): State<SharedContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body = object_body(&body);
    let data =
        ctx.custom_fields.update(&id, &body).await.or_failure("Failed to update custom field")?;

    ctx.definitions.invalidate();
    Ok(Json(data))
}

async fn delete_definition(
    State(ctx): State<SharedContext>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let data = ctx.custom_fields.deactivate(&id).await.or_failure("Failed to delete custom field")?;

    ctx.definitions.invalidate();
    Ok(Json(data))
}

/// Validate against a fresh schema; 200 when valid, 400 otherwise, with the
/// batch verdict as the body either way.
async fn validate_fields(
    State(ctx): State<SharedContext>,
    body: Bytes,
) -> Result<Response, AppError> {
    let body = object_body(&body);
    let candidates = custom_fields(&body);

    if candidates.is_empty() {
        return Err(AppError::BadRequest("customFields array is required".to_string()));
    }

    ctx.definitions.invalidate();
    let verdict = ctx.validation.validate(&candidates).await;

    let status = if verdict.valid { StatusCode::OK } else { StatusCode::BAD_REQUEST };
    Ok((status, Json(verdict)).into_response())
}
