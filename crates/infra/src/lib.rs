//! # qbo-bridge Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client shared by the upstream adapters
//! - Configuration loading (environment, TOML/JSON files)
//! - QuickBooks Online integration (OAuth, GraphQL custom fields, REST entities)
//! - Definition cache and custom field validation service
//!
//! ## Architecture
//! - Implements traits defined in `qbo-bridge-core`
//! - Depends on `qbo-bridge-domain` and `qbo-bridge-core`
//! - Contains all "impure" code (I/O, network, caching)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::*;
pub use integrations::quickbooks;
