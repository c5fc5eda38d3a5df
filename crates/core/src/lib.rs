//! # qbo-bridge Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The custom field validation engine (validator, corrector, payload builder)
//! - Entity request body assembly
//! - Port interfaces (traits) implemented by the infrastructure layer
//!
//! ## Architecture Principles
//! - Only depends on `qbo-bridge-domain`
//! - No HTTP, cache, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod custom_fields;
pub mod entities;

pub use custom_fields::ports::DefinitionsProvider;
pub use custom_fields::{build, build_all, correct_and_validate, validate_batch, validate_one};
