//! Accounting entity inputs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::custom_field::scalar_string;

/// Accounting entities the bridge writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Customer,
    Item,
    Invoice,
}

impl Entity {
    /// Path segment under `/v3/company/{realm}/`.
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Item => "item",
            Self::Invoice => "invoice",
        }
    }

    /// Top-level key wrapping the entity in read responses.
    pub const fn response_key(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Item => "Item",
            Self::Invoice => "Invoice",
        }
    }

    /// Body keys set from dedicated create parameters.
    pub const fn create_protected_keys(self) -> &'static [&'static str] {
        match self {
            Self::Customer => &["DisplayName"],
            Self::Item => &["Name", "Type"],
            Self::Invoice => &["Line", "CustomerRef"],
        }
    }
}

/// Body keys owned by the update flow.
pub const UPDATE_PROTECTED_KEYS: [&str; 2] = ["Id", "SyncToken"];

/// Caller-supplied invoice line.
///
/// Amount and quantity stay untyped and are coerced when the line is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    #[serde(default, deserialize_with = "scalar_string")]
    pub item_id: Option<String>,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub description: Option<String>,
}
