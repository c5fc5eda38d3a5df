//! Shared test helpers for `qbo-bridge-core` integration tests.
//!
//! Fixtures for definitions and snapshots plus a lightweight provider mock so
//! the property tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use qbo_bridge_core::DefinitionsProvider;
use qbo_bridge_domain::{
    CustomFieldDefinition, DefinitionSnapshot, DropDownOption, Result as DomainResult,
};

/// Active definition of the given type.
pub fn definition(legacy_id: &str, data_type: &str) -> CustomFieldDefinition {
    CustomFieldDefinition {
        id: Some(format!("remote-{legacy_id}")),
        legacy_id: Some(legacy_id.to_string()),
        label: Some(format!("Field {legacy_id}")),
        data_type: Some(data_type.to_string()),
        active: true,
        ..Default::default()
    }
}

/// Active dropdown definition with the given options, all active.
pub fn dropdown(legacy_id: &str, options: &[&str]) -> CustomFieldDefinition {
    let mut definition = definition(legacy_id, "DROPDOWN");
    definition.drop_down_options = options
        .iter()
        .enumerate()
        .map(|(order, value)| DropDownOption {
            id: Some(format!("{legacy_id}-{order}")),
            value: (*value).to_string(),
            active: true,
            order: i64::try_from(order).ok(),
        })
        .collect();
    definition
}

pub fn snapshot(definitions: Vec<CustomFieldDefinition>) -> DefinitionSnapshot {
    DefinitionSnapshot::from_definitions(definitions)
}

/// In-memory `DefinitionsProvider` that counts fetches.
#[derive(Default)]
pub struct StaticDefinitionsProvider {
    definitions: Vec<CustomFieldDefinition>,
    fetches: AtomicUsize,
}

impl StaticDefinitionsProvider {
    pub fn new(definitions: Vec<CustomFieldDefinition>) -> Self {
        Self { definitions, fetches: AtomicUsize::new(0) }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DefinitionsProvider for StaticDefinitionsProvider {
    async fn fetch_all(&self) -> DomainResult<Vec<CustomFieldDefinition>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.definitions.clone())
    }
}
