//! Type correction ahead of payload building
//!
//! Unlike [`validate_batch`](super::validator::validate_batch), the corrector
//! trusts the schema over the caller: a declared type that disagrees with the
//! definition is rewritten instead of rejected, and only the value shape can
//! still fail.

use qbo_bridge_domain::{CandidateField, CorrectionOutcome, CorrectionReport, DefinitionSnapshot};
use tracing::debug;

use super::validator::{check_value, missing_id_error, DEFINITION_NOT_FOUND};

/// Rewrite declared types to their authoritative definition types and check
/// every value.
///
/// Returns the corrected candidates in input order alongside the report. Ids
/// that fail to resolve are left untouched in the returned list.
pub fn correct_and_validate(
    snapshot: &DefinitionSnapshot,
    candidates: &[CandidateField],
) -> CorrectionOutcome {
    let mut errors = Vec::new();
    let mut corrected = Vec::new();
    let mut fields = Vec::with_capacity(candidates.len());

    for (index, candidate) in candidates.iter().enumerate() {
        let mut field = candidate.clone();

        let Some(definition_id) = candidate.definition_id.as_deref() else {
            errors.push(missing_id_error(index));
            fields.push(field);
            continue;
        };

        let Some(definition) = snapshot.get(definition_id) else {
            errors.push(format!("Field {definition_id}: {DEFINITION_NOT_FOUND}"));
            fields.push(field);
            continue;
        };

        if !definition.active {
            errors.push(format!("Field {definition_id}: Custom field definition is not active"));
            fields.push(field);
            continue;
        }

        let expected = definition.expected_type();
        let declared = candidate.field_type.as_deref().unwrap_or_default().to_uppercase();

        if !expected.as_str().is_empty() && declared != expected.as_str() {
            let from = candidate
                .field_type
                .as_deref()
                .map_or_else(|| "(not provided)".to_string(), |original| format!("'{original}'"));

            debug!(definition_id, from = %from, to = %expected, "Correcting custom field type");
            corrected.push(format!(
                "Field {definition_id}: type corrected from {from} to '{expected}'"
            ));
            field.field_type = Some(expected.to_string());
        }

        if let Some(error) = check_value(definition, &expected, &candidate.value) {
            errors.push(format!("Field {definition_id}: {error}"));
        }

        fields.push(field);
    }

    CorrectionOutcome { report: CorrectionReport::new(errors, corrected), fields }
}
