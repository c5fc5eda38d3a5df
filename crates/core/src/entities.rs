//! Request body assembly for accounting entities
//!
//! Bodies are plain JSON maps: the bridge only models the custom field list
//! and the handful of keys it sets itself, everything else passes through from
//! `additionalData`.

use qbo_bridge_domain::constants::CUSTOM_FIELD_KEY;
use qbo_bridge_domain::{
    BridgeError, CustomFieldPayload, CustomFieldValue, Entity, LineItemInput, Result,
    UPDATE_PROTECTED_KEYS,
};
use serde_json::{json, Map, Value};

use crate::custom_fields::value::numeric_value;

pub type Body = Map<String, Value>;

/// Amount of the single line on a cost-of-fuel invoice.
pub const COST_OF_FUEL_LINE_AMOUNT: f64 = 100.00;

/// Reject `additionalData` that would overwrite keys set from create
/// parameters.
pub fn guard_create_data(entity: Entity, additional: &Body) -> Result<()> {
    guard(additional, entity.create_protected_keys(), "Use the method parameters instead.")
}

/// Reject `additionalData` that would overwrite `Id` or `SyncToken`.
pub fn guard_update_data(additional: &Body) -> Result<()> {
    guard(additional, &UPDATE_PROTECTED_KEYS, "This field is managed internally.")
}

fn guard(additional: &Body, protected: &[&str], hint: &str) -> Result<()> {
    if is_set(additional, CUSTOM_FIELD_KEY) {
        return Err(BridgeError::InvalidInput(
            "CustomField should not be in additionalData. Use the customFields parameter instead."
                .to_string(),
        ));
    }

    match protected.iter().find(|key| is_set(additional, key)) {
        Some(key) => Err(BridgeError::InvalidInput(format!(
            "{key} should not be in additionalData. {hint}"
        ))),
        None => Ok(()),
    }
}

// Null entries do not count as set; they merge through unchanged.
fn is_set(additional: &Body, key: &str) -> bool {
    additional.get(key).is_some_and(|value| !value.is_null())
}

pub fn customer_create_body(
    display_name: &str,
    payloads: &[CustomFieldPayload],
    additional: Body,
) -> Body {
    let mut body = Body::new();
    body.insert("DisplayName".to_string(), json!(display_name));
    finish(body, payloads, additional)
}

pub fn item_create_body(
    name: &str,
    item_type: &str,
    payloads: &[CustomFieldPayload],
    additional: Body,
) -> Body {
    let mut body = Body::new();
    body.insert("Name".to_string(), json!(name));
    body.insert("Type".to_string(), json!(item_type));
    finish(body, payloads, additional)
}

/// Invoice body with one `SalesItemLineDetail` line per input.
pub fn invoice_create_body(
    customer_id: &str,
    lines: &[LineItemInput],
    payloads: &[CustomFieldPayload],
    additional: Body,
) -> Result<Body> {
    if lines.is_empty() {
        return Err(BridgeError::InvalidInput("At least one line item is required".to_string()));
    }

    let mut body = Body::new();
    body.insert("Line".to_string(), Value::Array(lines.iter().map(invoice_line).collect()));
    body.insert("CustomerRef".to_string(), json!({ "value": customer_id }));
    Ok(finish(body, payloads, additional))
}

/// Sparse update body carrying the entity's current `SyncToken`.
pub fn update_body(
    entity_id: &str,
    sync_token: Value,
    payloads: &[CustomFieldPayload],
    additional: Body,
) -> Body {
    let mut body = Body::new();
    body.insert("Id".to_string(), json!(entity_id));
    body.insert("SyncToken".to_string(), sync_token);
    finish(body, payloads, additional)
}

/// Fixed single-line invoice tagged with one prebuilt custom field.
pub fn cost_of_fuel_body(customer_id: &str, item_id: &str, payload: &CustomFieldPayload) -> Body {
    let mut body = Body::new();
    body.insert(
        "Line".to_string(),
        json!([{
            "Amount": COST_OF_FUEL_LINE_AMOUNT,
            "DetailType": "SalesItemLineDetail",
            "SalesItemLineDetail": { "ItemRef": { "value": item_id } },
        }]),
    );
    body.insert("CustomerRef".to_string(), json!({ "value": customer_id }));
    body.insert(CUSTOM_FIELD_KEY.to_string(), json!([payload_value(payload)]));
    body
}

fn invoice_line(input: &LineItemInput) -> Value {
    let mut detail = json!({
        "ItemRef": { "value": input.item_id.as_deref().unwrap_or_default() },
    });
    if let Some(quantity) = &input.quantity {
        detail["Qty"] = json!(numeric_value(quantity).unwrap_or(0.0));
    }

    let mut line = json!({
        "Amount": numeric_value(&input.amount).unwrap_or(0.0),
        "DetailType": "SalesItemLineDetail",
        "SalesItemLineDetail": detail,
    });
    if let Some(description) = &input.description {
        line["Description"] = json!(description);
    }

    line
}

fn finish(mut body: Body, payloads: &[CustomFieldPayload], additional: Body) -> Body {
    if !payloads.is_empty() {
        body.insert(
            CUSTOM_FIELD_KEY.to_string(),
            Value::Array(payloads.iter().map(payload_value).collect()),
        );
    }

    body.extend(additional);
    body
}

/// JSON form of a payload as it appears in entity bodies.
pub fn payload_value(payload: &CustomFieldPayload) -> Value {
    match &payload.value {
        CustomFieldValue::Number(number) => {
            json!({ "DefinitionId": payload.definition_id, "NumberValue": number })
        }
        CustomFieldValue::String(text) => {
            json!({ "DefinitionId": payload.definition_id, "StringValue": text })
        }
    }
}
