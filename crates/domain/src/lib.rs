//! # qbo-bridge Domain
//!
//! Business domain types for the QuickBooks Online bridge.
//!
//! This crate contains:
//! - Custom field definitions, candidates and wire payloads
//! - Validation and correction verdicts
//! - Domain error types and Result definitions
//! - Configuration structures and platform constants
//!
//! ## Architecture
//! - No dependencies on other qbo-bridge crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
