//! Custom field port interfaces

use async_trait::async_trait;
use qbo_bridge_domain::{CustomFieldDefinition, Result};

/// Bulk source of custom field definitions.
///
/// Implemented by the GraphQL schema client; the definition cache is its only
/// caller.
#[async_trait]
pub trait DefinitionsProvider: Send + Sync {
    /// Fetch every definition the company owns, active or not.
    async fn fetch_all(&self) -> Result<Vec<CustomFieldDefinition>>;
}
