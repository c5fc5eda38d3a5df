//! Custom field validation against the cached schema
//!
//! Couples the [`DefinitionCache`] with the pure validation engine from
//! `qbo-bridge-core`:
//! 1. **Report** - `validate` checks candidates without changing them
//! 2. **Correct** - `correct` rewrites declared types to the schema's types
//! 3. **Prepare** - `prepare_payloads` corrects, rejects on errors and builds
//!    the wire payloads from the corrected list
//!
//! Empty candidate lists never touch the cache.

use std::sync::Arc;

use qbo_bridge_core::custom_fields::{build_all, correct_and_validate, validate_batch};
use qbo_bridge_domain::{
    BatchVerdict, BridgeError, CandidateField, CorrectionOutcome, CustomFieldPayload, Result,
};
use tracing::{debug, info};

use super::cache::DefinitionCache;

/// Validation entry point used by the entity and custom field endpoints
pub struct CustomFieldValidationService {
    cache: Arc<DefinitionCache>,
}

impl CustomFieldValidationService {
    pub fn new(cache: Arc<DefinitionCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<DefinitionCache> {
        &self.cache
    }

    /// Read-only batch verdict.
    pub async fn validate(&self, candidates: &[CandidateField]) -> BatchVerdict {
        if candidates.is_empty() {
            return BatchVerdict::new(Vec::new(), Vec::new());
        }

        let snapshot = self.cache.get().await;
        validate_batch(&snapshot, candidates)
    }

    /// Correct declared types and check values.
    pub async fn correct(&self, candidates: &[CandidateField]) -> CorrectionOutcome {
        if candidates.is_empty() {
            return CorrectionOutcome::default();
        }

        let snapshot = self.cache.get().await;
        let outcome = correct_and_validate(&snapshot, candidates);

        for note in &outcome.report.corrected {
            debug!(correction = %note, "Custom field type corrected");
        }

        outcome
    }

    /// Wire payloads for an entity body.
    ///
    /// # Errors
    /// `BridgeError::CustomFieldValidation` carrying every error in input
    /// order when any candidate is rejected.
    pub async fn prepare_payloads(
        &self,
        candidates: &[CandidateField],
    ) -> Result<Vec<CustomFieldPayload>> {
        let outcome = self.correct(candidates).await;

        if !outcome.report.valid {
            info!(errors = outcome.report.errors.len(), "Custom field validation failed");
            return Err(BridgeError::CustomFieldValidation(outcome.report.errors));
        }

        Ok(build_all(&outcome.fields))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use qbo_bridge_core::DefinitionsProvider;
    use qbo_bridge_domain::{CustomFieldDefinition, CustomFieldValue};
    use serde_json::json;

    use super::*;

    struct FixedProvider {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl DefinitionsProvider for FixedProvider {
        async fn fetch_all(&self) -> Result<Vec<CustomFieldDefinition>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![CustomFieldDefinition {
                legacy_id: Some("42".to_string()),
                data_type: Some("NUMBER".to_string()),
                active: true,
                ..Default::default()
            }])
        }
    }

    fn service() -> (Arc<FixedProvider>, CustomFieldValidationService) {
        let provider = Arc::new(FixedProvider { fetches: AtomicUsize::new(0) });
        let cache = Arc::new(DefinitionCache::new(provider.clone()));
        (provider, CustomFieldValidationService::new(cache))
    }

    #[tokio::test]
    async fn payloads_use_corrected_types() {
        let (_, service) = service();
        let candidates = vec![CandidateField::new("42", json!("3.5")).with_type("STRING")];

        let payloads = service.prepare_payloads(&candidates).await.unwrap();

        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].value, CustomFieldValue::Number(3.5));
    }

    #[tokio::test]
    async fn rejected_candidates_surface_all_errors() {
        let (_, service) = service();
        let candidates = vec![
            CandidateField::new("42", json!("abc")),
            CandidateField::new("7", json!("x")),
        ];

        let err = service.prepare_payloads(&candidates).await.unwrap_err();

        match err {
            BridgeError::CustomFieldValidation(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].starts_with("Field 42: Value must be numeric"));
                assert!(errors[1].starts_with("Field 7: Custom field definition not found"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_lists_skip_the_schema() {
        let (provider, service) = service();

        assert!(service.prepare_payloads(&[]).await.unwrap().is_empty());
        assert!(service.validate(&[]).await.valid);

        let outcome = service.correct(&[]).await;
        assert!(outcome.report.valid);
        assert!(outcome.report.errors.is_empty());
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn repeated_validation_hits_the_cache() {
        let (provider, service) = service();
        let candidates = vec![CandidateField::new("42", json!(1))];

        service.validate(&candidates).await;
        service.correct(&candidates).await;
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);

        service.cache().invalidate();
        service.validate(&candidates).await;
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 2);
    }
}
