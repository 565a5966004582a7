//! Classification by language model, failing open to a fixed fallback.

use std::sync::Arc;

use sift_core::config::ClassifierConfig;
use sift_core::traits::{IClassifier, ILanguageModel};
use sift_core::Classification;
use sift_observability::tracing_setup::events;
use tracing::{debug, info};

use crate::parse::parse_classification;
use crate::prompt::classification_prompt;

/// Classifier backed by a language model.
pub struct ModelClassifier {
    model: Arc<dyn ILanguageModel>,
    config: ClassifierConfig,
}

impl ModelClassifier {
    pub fn new(model: Arc<dyn ILanguageModel>, config: ClassifierConfig) -> Self {
        Self { model, config }
    }

    /// Classify several queries in order.
    pub fn classify_batch(&self, queries: &[String]) -> Vec<Classification> {
        queries.iter().map(|q| self.classify(q)).collect()
    }

    fn fallback(&self, failure: &str) -> Classification {
        events::unit_degraded("classifier", failure, "search");
        Classification::fallback(self.config.fallback_confidence, failure)
    }
}

impl IClassifier for ModelClassifier {
    fn classify(&self, query: &str) -> Classification {
        let span = sift_observability::classify_span!(query.len());
        let _guard = span.enter();

        let reply = match self.model.invoke(&classification_prompt(query)) {
            Ok(reply) => reply,
            Err(e) => return self.fallback(&e.to_string()),
        };
        debug!(backend = self.model.name(), reply_len = reply.len(), "classifier replied");

        match parse_classification(&reply) {
            Ok(classification) => {
                info!(
                    intent = %classification.intent,
                    confidence = classification.confidence,
                    requires_retrieval = classification.requires_retrieval,
                    "query classified"
                );
                classification
            }
            Err(e) => self.fallback(&e.to_string()),
        }
    }
}
