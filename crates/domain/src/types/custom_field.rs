//! Custom field schema and caller-facing field types
//!
//! Definitions are owned by the accounting platform and arrive over GraphQL;
//! candidates arrive from HTTP callers. Both are parsed leniently because the
//! upstream schema and the callers are loose about nulls and scalar kinds.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Authoritative data type of a custom field definition.
///
/// Parsed case-insensitively and always rendered upper-case. Tags the
/// platform may add later are kept verbatim in [`FieldDataType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldDataType {
    String,
    Number,
    Dropdown,
    Other(String),
}

impl FieldDataType {
    /// Parse a raw type tag, normalising it to upper-case.
    pub fn parse(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "STRING" => Self::String,
            "NUMBER" => Self::Number,
            "DROPDOWN" => Self::Dropdown,
            other => Self::Other(other.to_string()),
        }
    }

    /// Upper-case wire name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Dropdown => "DROPDOWN",
            Self::Other(tag) => tag,
        }
    }
}

impl Default for FieldDataType {
    fn default() -> Self {
        Self::String
    }
}

impl fmt::Display for FieldDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldDataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldDataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// One selectable value of a `DROPDOWN` definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropDownOption {
    #[serde(default, deserialize_with = "scalar_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default)]
    pub order: Option<i64>,
}

/// Custom field definition as returned by the schema service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldDefinition {
    /// Opaque remote identifier, not used for lookups.
    #[serde(default, deserialize_with = "scalar_string")]
    pub id: Option<String>,

    /// Stable short identifier referenced by entity payloads.
    #[serde(default, rename = "legacyIDV2", deserialize_with = "scalar_string")]
    pub legacy_id: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    /// Raw type tag; absent means `STRING`.
    #[serde(default)]
    pub data_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Absent or null means inactive.
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub drop_down_options: Vec<DropDownOption>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub associations: Vec<Value>,
}

impl CustomFieldDefinition {
    /// Authoritative type of the definition.
    pub fn expected_type(&self) -> FieldDataType {
        self.data_type.as_deref().map(FieldDataType::parse).unwrap_or_default()
    }

    /// Option values in their declared order, inactive options included.
    pub fn option_values(&self) -> Vec<&str> {
        self.drop_down_options.iter().map(|option| option.value.as_str()).collect()
    }
}

/// Immutable `legacyId → definition` index built from one bulk fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionSnapshot {
    definitions: HashMap<String, CustomFieldDefinition>,
}

impl DefinitionSnapshot {
    /// Index definitions by legacy id.
    ///
    /// Definitions without a legacy id cannot be addressed by entity payloads
    /// and are dropped. A later duplicate id replaces the earlier one.
    pub fn from_definitions<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = CustomFieldDefinition>,
    {
        let definitions = definitions
            .into_iter()
            .filter_map(|definition| match definition.legacy_id.as_deref() {
                Some(id) if !id.is_empty() => Some((id.to_string(), definition)),
                _ => None,
            })
            .collect();

        Self { definitions }
    }

    pub fn get(&self, legacy_id: &str) -> Option<&CustomFieldDefinition> {
        self.definitions.get(legacy_id)
    }

    pub fn contains(&self, legacy_id: &str) -> bool {
        self.definitions.contains_key(legacy_id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Caller-supplied custom field awaiting validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateField {
    /// Legacy id of the targeted definition. Empty, zero, null and
    /// non-scalar ids all read as missing.
    #[serde(
        default,
        deserialize_with = "definition_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub definition_id: Option<String>,

    /// Untyped scalar; absent or null reads as the empty string.
    #[serde(default = "empty_value", deserialize_with = "value_or_empty")]
    pub value: Value,

    /// Advisory type supplied by the caller.
    #[serde(
        default,
        rename = "type",
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub field_type: Option<String>,
}

impl CandidateField {
    pub fn new(definition_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            definition_id: present_id(definition_id.into()),
            value: value.into(),
            field_type: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }
}

/// Value slot of a wire payload; exactly one is ever present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CustomFieldValue {
    #[serde(rename = "NumberValue")]
    Number(f64),
    #[serde(rename = "StringValue")]
    String(String),
}

/// Custom field entry as the accounting REST API expects it under
/// `CustomField`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldPayload {
    #[serde(rename = "DefinitionId")]
    pub definition_id: String,
    #[serde(flatten)]
    pub value: CustomFieldValue,
}

fn empty_value() -> Value {
    Value::String(String::new())
}

fn value_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(if value.is_null() { empty_value() } else { value })
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept string or numeric scalars; anything else reads as absent.
pub(crate) fn scalar_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Empty strings, `"0"` and numeric zero all count as a missing id.
fn definition_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => present_id(text),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn present_id(id: String) -> Option<String> {
    (!id.is_empty() && id != "0").then_some(id)
}
