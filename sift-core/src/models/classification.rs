use serde::{Deserialize, Serialize};

use crate::intent::Intent;

/// Output of the classifier unit. Produced once per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: Intent,
    /// Classifier confidence in [0, 1].
    pub confidence: f64,
    pub requires_retrieval: bool,
    pub rationale: String,
}

impl Classification {
    /// Build a classification, clamping confidence into [0, 1].
    /// A `General` intent never requires retrieval.
    pub fn new(
        intent: Intent,
        confidence: f64,
        requires_retrieval: bool,
        rationale: impl Into<String>,
    ) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            intent,
            confidence,
            requires_retrieval: requires_retrieval && intent != Intent::General,
            rationale: rationale.into(),
        }
    }

    /// Coerced result for an intent label nobody recognizes.
    pub fn unrecognized(label: &str, confidence: f64) -> Self {
        Self::new(
            Intent::General,
            confidence,
            false,
            format!("unrecognized intent {label:?} coerced to general"),
        )
    }

    /// Fail-open result used when classification itself fails.
    ///
    /// Falls back to `Search` so the query still gets a grounded answer.
    pub fn fallback(confidence: f64, failure: &str) -> Self {
        Self::new(
            Intent::Search,
            confidence,
            true,
            format!("fallback classification after failure: {failure}"),
        )
    }
}
