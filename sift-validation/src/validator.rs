use std::sync::Arc;

use sift_core::config::ValidationConfig;
use sift_core::traits::{ILanguageModel, IValidator};
use sift_core::{RetrievedDocument, SiftResult, ValidationResult};
use sift_observability::tracing_setup::events;
use tracing::{debug, info, warn};

use crate::prompt::validation_prompt;
use crate::report::{decide, parse_report};

/// Language-model validator.
pub struct Validator {
    model: Arc<dyn ILanguageModel>,
    config: ValidationConfig,
}

impl Validator {
    pub fn new(model: Arc<dyn ILanguageModel>, config: ValidationConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    fn assess(
        &self,
        query: &str,
        response: &str,
        documents: &[RetrievedDocument],
    ) -> SiftResult<ValidationResult> {
        let reply = self
            .model
            .invoke(&validation_prompt(query, response, documents))?;
        let report = parse_report(&reply)?;
        Ok(decide(report, response, !documents.is_empty(), &self.config))
    }
}

impl IValidator for Validator {
    fn validate(
        &self,
        query: &str,
        response: &str,
        documents: &[RetrievedDocument],
    ) -> ValidationResult {
        let span = sift_observability::validation_span!(documents.len());
        let _guard = span.enter();

        if documents.is_empty() {
            debug!("no documents supplied, failing closed");
            return ValidationResult::no_evidence();
        }

        match self.assess(query, response, documents) {
            Ok(verdict) => {
                info!(
                    score = verdict.confidence_score,
                    is_valid = verdict.is_valid,
                    issues = verdict.issues.len(),
                    "response validated"
                );
                if verdict.needs_regeneration {
                    warn!(issues = ?verdict.issues, "response rejected");
                }
                verdict
            }
            Err(e) => {
                let failure = e.to_string();
                events::unit_degraded("validator", &failure, "accept response");
                ValidationResult::validator_unavailable(&failure)
            }
        }
    }
}
