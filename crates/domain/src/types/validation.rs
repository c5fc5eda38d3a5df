//! Verdicts produced by the custom field validation engine

use serde::{Deserialize, Serialize};

use super::custom_field::{CandidateField, FieldDataType};

/// Outcome of checking a single value against its definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldVerdict {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Known whenever the definition was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_type: Option<FieldDataType>,
}

impl FieldVerdict {
    pub fn valid(expected_type: FieldDataType) -> Self {
        Self { valid: true, error: None, expected_type: Some(expected_type) }
    }

    pub fn invalid(error: impl Into<String>, expected_type: Option<FieldDataType>) -> Self {
        Self { valid: false, error: Some(error.into()), expected_type }
    }
}

/// Aggregate outcome for a list of candidate fields.
///
/// Errors keep input order and `valid` holds exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchVerdict {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl BatchVerdict {
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self { valid: errors.is_empty(), errors, warnings }
    }
}

impl Default for BatchVerdict {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

/// Summary of a correction pass.
///
/// `corrected` lists one note per field whose declared type was rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub corrected: Vec<String>,
}

impl CorrectionReport {
    pub fn new(errors: Vec<String>, corrected: Vec<String>) -> Self {
        Self { valid: errors.is_empty(), errors, corrected }
    }
}

impl Default for CorrectionReport {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

/// Report plus the rewritten field list.
///
/// Fields keep their input order; only their `type` may differ. The default
/// is the outcome for an empty list: valid, nothing corrected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrectionOutcome {
    pub report: CorrectionReport,
    pub fields: Vec<CandidateField>,
}
