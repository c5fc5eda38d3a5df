//! Domain types and models

pub mod custom_field;
pub mod entity;
pub mod validation;

pub use custom_field::{
    CandidateField, CustomFieldDefinition, CustomFieldPayload, CustomFieldValue,
    DefinitionSnapshot, DropDownOption, FieldDataType,
};
pub use entity::{Entity, LineItemInput, UPDATE_PROTECTED_KEYS};
pub use validation::{BatchVerdict, CorrectionOutcome, CorrectionReport, FieldVerdict};
