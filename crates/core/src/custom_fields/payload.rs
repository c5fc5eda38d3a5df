//! Wire payload construction

use qbo_bridge_domain::{CandidateField, CustomFieldPayload, CustomFieldValue, FieldDataType};
use serde_json::Value;

use super::value::{numeric_value, render_string};

/// Build the wire payload for one field.
///
/// `NUMBER` yields `NumberValue`, falling back to `0.0` for values that do not
/// coerce. Every other type yields `StringValue`.
pub fn build(definition_id: &str, value: &Value, field_type: &str) -> CustomFieldPayload {
    let value = match FieldDataType::parse(field_type) {
        FieldDataType::Number => CustomFieldValue::Number(numeric_value(value).unwrap_or(0.0)),
        _ => CustomFieldValue::String(render_string(value)),
    };

    CustomFieldPayload { definition_id: definition_id.to_string(), value }
}

/// Build payloads for every candidate that carries an id.
///
/// Candidates without a declared type are built as `STRING`.
pub fn build_all(fields: &[CandidateField]) -> Vec<CustomFieldPayload> {
    fields
        .iter()
        .filter_map(|field| {
            let definition_id = field.definition_id.as_deref()?;
            let field_type = field.field_type.as_deref().unwrap_or(FieldDataType::String.as_str());
            Some(build(definition_id, &field.value, field_type))
        })
        .collect()
}
