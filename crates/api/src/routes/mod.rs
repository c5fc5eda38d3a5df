//! # API Route Modules
//!
//! - `pages` - static front-end pages
//! - `auth` - OAuth login, callback and token retrieval
//! - `custom_fields` - custom field definitions and batch validation
//! - `customers`, `items`, `invoices` - accounting entities

pub mod auth;
pub mod custom_fields;
pub mod customers;
pub mod invoices;
pub mod items;
pub mod pages;

use crate::error::AppError;

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
