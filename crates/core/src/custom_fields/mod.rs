//! Custom field validation engine
//!
//! Pure functions over a [`DefinitionSnapshot`](qbo_bridge_domain::DefinitionSnapshot):
//! the validator reports, the corrector rewrites declared types and the
//! payload builder emits wire payloads from the corrected list.

pub mod corrector;
pub mod payload;
pub mod ports;
pub mod validator;
pub mod value;

pub use corrector::correct_and_validate;
pub use payload::{build, build_all};
pub use ports::DefinitionsProvider;
pub use validator::{check_value, validate_batch, validate_one, DEFINITION_NOT_FOUND};
