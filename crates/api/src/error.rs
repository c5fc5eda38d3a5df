//! # API Error Types
//!
//! [`AppError`] implements `axum::response::IntoResponse` and fixes the
//! response shape for every failure the handlers can produce:
//!
//! - `{"message": ...}` for request-level rejections (400/401/404)
//! - `{"message": "Failed to ...", "error": ...}` for failed operations
//! - `{"message": "Custom field validation failed", "errors": [...]}` when
//!   custom fields are rejected
//! - plain text for the browser-facing auth and page endpoints

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use qbo_bridge_domain::BridgeError;
use serde_json::json;
use thiserror::Error;

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// No valid token is stored (401).
    #[error("Not authenticated")]
    Unauthorized,

    /// Missing or malformed request parameters (400).
    #[error("{0}")]
    BadRequest(String),

    /// Unmatched route (404).
    #[error("{0}")]
    NotFound(String),

    /// Plain-text response for browser-facing endpoints.
    #[error("{1}")]
    Text(StatusCode, String),

    /// An operation against the upstream company failed.
    #[error("{message}: {source}")]
    Operation {
        message: &'static str,
        #[source]
        source: BridgeError,
    },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Text(status, _) => *status,
            Self::Operation { source, .. } => match source {
                BridgeError::CustomFieldValidation(_) | BridgeError::InvalidInput(_) => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        match self {
            Self::Text(status, body) => (status, body).into_response(),
            Self::Unauthorized => {
                (status, Json(json!({ "message": "Not authenticated" }))).into_response()
            }
            Self::BadRequest(message) | Self::NotFound(message) => {
                (status, Json(json!({ "message": message }))).into_response()
            }
            Self::Operation { source: BridgeError::CustomFieldValidation(errors), .. } => (
                status,
                Json(json!({ "message": "Custom field validation failed", "errors": errors })),
            )
                .into_response(),
            Self::Operation { message, source } => {
                let error = match source {
                    BridgeError::InvalidInput(detail) => detail,
                    other => other.to_string(),
                };
                (status, Json(json!({ "message": message, "error": error }))).into_response()
            }
        }
    }
}

/// Attach the operation name reported to the client on failure.
pub trait OperationResultExt<T> {
    fn or_failure(self, message: &'static str) -> Result<T, AppError>;
}

impl<T> OperationResultExt<T> for Result<T, BridgeError> {
    fn or_failure(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|source| AppError::Operation { message, source })
    }
}
