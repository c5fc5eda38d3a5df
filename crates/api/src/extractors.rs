//! # Lenient Request Body Helpers
//!
//! Handlers take the raw body and read parameters through these helpers.
//! A body that is not a JSON object reads as `{}`; parameters of the wrong
//! shape read as absent, so the handlers' own "is required" checks decide
//! what to reject.

use qbo_bridge_core::entities::Body;
use qbo_bridge_domain::{CandidateField, LineItemInput};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse the request body as a JSON object.
pub fn object_body(bytes: &[u8]) -> Body {
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(map)) => map,
        _ => Body::new(),
    }
}

/// String parameter; numbers are rendered, anything else is empty.
pub fn string_param(body: &Body, key: &str) -> String {
    match body.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// Entries of an array (or the values of an object) parameter.
pub fn list_param(body: &Body, key: &str) -> Vec<Value> {
    match body.get(key) {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Object(map)) => map.values().cloned().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(scalar) => vec![scalar.clone()],
    }
}

/// Object parameter, empty when absent or not an object.
pub fn object_param(body: &Body, key: &str) -> Body {
    match body.get(key) {
        Some(Value::Object(map)) => map.clone(),
        _ => Body::new(),
    }
}

/// `customFields` entries; entries that are not objects read as fields
/// without a definition id.
pub fn custom_fields(body: &Body) -> Vec<CandidateField> {
    list_param(body, "customFields")
        .into_iter()
        .map(|entry| {
            entry_or(entry, || CandidateField {
                definition_id: None,
                value: Value::String(String::new()),
                field_type: None,
            })
        })
        .collect()
}

/// `lineItems` entries.
pub fn line_items(body: &Body) -> Vec<LineItemInput> {
    list_param(body, "lineItems")
        .into_iter()
        .map(|entry| entry_or(entry, LineItemInput::default))
        .collect()
}

fn entry_or<T: DeserializeOwned>(entry: Value, fallback: impl FnOnce() -> T) -> T {
    serde_json::from_value(entry).unwrap_or_else(|_| fallback())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn non_object_bodies_read_as_empty() {
        assert!(object_body(b"not json").is_empty());
        assert!(object_body(b"[1, 2]").is_empty());
        assert_eq!(object_body(br#"{"a": 1}"#).len(), 1);
    }

    #[test]
    fn numeric_ids_are_rendered() {
        let body = object_body(br#"{"customerId": 58, "itemId": "7", "flag": true}"#);

        assert_eq!(string_param(&body, "customerId"), "58");
        assert_eq!(string_param(&body, "itemId"), "7");
        assert_eq!(string_param(&body, "flag"), "");
        assert_eq!(string_param(&body, "missing"), "");
    }

    #[test]
    fn malformed_custom_field_entries_lack_an_id() {
        let body = object_body(
            json!({"customFields": [{"definitionId": "1", "value": 5}, "junk"]})
                .to_string()
                .as_bytes(),
        );

        let fields = custom_fields(&body);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].definition_id.as_deref(), Some("1"));
        assert_eq!(fields[1].definition_id, None);
    }

    #[test]
    fn additional_data_must_be_an_object() {
        let body = object_body(br#"{"additionalData": [1], "extra": {"TxnDate": "2024-01-01"}}"#);

        assert!(object_param(&body, "additionalData").is_empty());
        assert_eq!(object_param(&body, "extra")["TxnDate"], json!("2024-01-01"));
    }
}
