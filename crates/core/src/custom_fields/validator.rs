//! Field validation against a definition snapshot
//!
//! Validation never fails: every rejection is reported as a verdict string so
//! callers can collect and return them together.

use qbo_bridge_domain::{
    BatchVerdict, CandidateField, CustomFieldDefinition, DefinitionSnapshot, FieldDataType,
    FieldVerdict,
};
use serde_json::Value;

use super::value::{is_composite, is_numeric, render_string, value_kind};

pub const DEFINITION_NOT_FOUND: &str =
    "Custom field definition not found. Please ensure the field exists in QuickBooks.";

/// Validate one value against the definition registered under `definition_id`.
///
/// Checks short-circuit in order: unknown id, inactive definition, declared
/// type mismatch, then the value shape for the authoritative type.
pub fn validate_one(
    snapshot: &DefinitionSnapshot,
    definition_id: &str,
    value: &Value,
    provided_type: Option<&str>,
) -> FieldVerdict {
    let Some(definition) = snapshot.get(definition_id) else {
        return FieldVerdict::invalid(DEFINITION_NOT_FOUND, None);
    };

    let expected = definition.expected_type();

    if !definition.active {
        return FieldVerdict::invalid(
            format!("Custom field definition {definition_id} is not active"),
            Some(expected),
        );
    }

    if let Some(provided) = provided_type {
        if provided.to_uppercase() != expected.as_str() {
            return FieldVerdict::invalid(
                format!("Type mismatch: provided '{provided}' but definition expects '{expected}'"),
                Some(expected),
            );
        }
    }

    match check_value(definition, &expected, value) {
        Some(error) => FieldVerdict::invalid(error, Some(expected)),
        None => FieldVerdict::valid(expected),
    }
}

/// Validate every candidate in input order.
///
/// Candidates without an id are reported by index and skip all other checks.
pub fn validate_batch(
    snapshot: &DefinitionSnapshot,
    candidates: &[CandidateField],
) -> BatchVerdict {
    let mut errors = Vec::new();

    for (index, candidate) in candidates.iter().enumerate() {
        let Some(definition_id) = candidate.definition_id.as_deref() else {
            errors.push(missing_id_error(index));
            continue;
        };

        let verdict = validate_one(
            snapshot,
            definition_id,
            &candidate.value,
            candidate.field_type.as_deref(),
        );

        if !verdict.valid {
            let error = verdict.error.unwrap_or_default();
            errors.push(format!("Field {definition_id}: {error}"));
        }
    }

    BatchVerdict::new(errors, Vec::new())
}

/// Value-shape check for the authoritative type.
///
/// Returns the rejection message, or `None` when the value is acceptable.
/// Tags other than the three known types are not checked.
pub fn check_value(
    definition: &CustomFieldDefinition,
    expected: &FieldDataType,
    value: &Value,
) -> Option<String> {
    match expected {
        FieldDataType::Number if !is_numeric(value) => Some(format!(
            "Value must be numeric for NUMBER field (got: {})",
            value_kind(value)
        )),
        FieldDataType::String if is_composite(value) => Some(format!(
            "Value cannot be converted to string (got: {})",
            value_kind(value)
        )),
        FieldDataType::Dropdown if !definition.drop_down_options.is_empty() => {
            let options = definition.option_values();
            let rendered = render_string(value);

            (!options.contains(&rendered.as_str())).then(|| {
                format!(
                    "Value '{rendered}' is not a valid dropdown option. Valid options: {}",
                    options.join(", ")
                )
            })
        }
        _ => None,
    }
}

pub(crate) fn missing_id_error(index: usize) -> String {
    format!("Field at index {index}: definitionId is required")
}
