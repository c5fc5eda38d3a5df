//! # qbo-bridge API
//!
//! HTTP layer - routes, middleware and the binary entry point.
//!
//! This crate contains:
//! - axum routes for auth, custom fields, customers, items and invoices
//! - Application context (dependency injection)
//! - Error mapping to JSON responses
//! - Logging setup
//!
//! ## Route Surface
//!
//! | Prefix                          | Module                    | Auth |
//! |---------------------------------|---------------------------|------|
//! | `/`, `/pages/*`                 | [`routes::pages`]         | no   |
//! | `/api/auth/*`                   | [`routes::auth`]          | no   |
//! | `/api/quickbook/custom-fields*` | [`routes::custom_fields`] | yes  |
//! | `/api/quickbook/customers*`     | [`routes::customers`]     | yes  |
//! | `/api/quickbook/items*`         | [`routes::items`]         | yes  |
//! | `/api/quickbook/invoices*`      | [`routes::invoices`]      | yes  |
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod context;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod utils;

use std::sync::Arc;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;

pub use context::*;
pub use error::AppError;

/// Assemble the full application router.
///
/// Pages and auth endpoints are public; everything under
/// `/api/quickbook` sits behind [`middleware::auth::require_auth`].
pub fn app(ctx: Arc<AppContext>) -> Router {
    let quickbook = Router::new()
        .merge(routes::custom_fields::router())
        .merge(routes::customers::router())
        .merge(routes::items::router())
        .merge(routes::invoices::router())
        .route_layer(from_fn_with_state(ctx.clone(), middleware::auth::require_auth));

    Router::new()
        .merge(routes::pages::router())
        .merge(routes::auth::router())
        .merge(quickbook)
        .fallback(routes::not_found)
        .layer(from_fn(middleware::request_log::log_request))
        .with_state(ctx)
}
