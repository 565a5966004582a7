use serde::{Deserialize, Serialize};

use super::defaults;

/// How queries are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierStrategy {
    /// Ask the configured language model.
    Model,
    /// Offline keyword tables, no backend calls.
    Keyword,
}

/// Classifier unit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub strategy: ClassifierStrategy,
    /// Confidence reported by the failure fallback classification.
    pub fallback_confidence: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            strategy: ClassifierStrategy::Model,
            fallback_confidence: defaults::DEFAULT_CLASSIFIER_FALLBACK_CONFIDENCE,
        }
    }
}
