use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights of the five validation criteria. Expected to sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaWeights {
    pub coherence: f64,
    pub alignment: f64,
    pub groundedness: f64,
    pub completeness: f64,
    pub citation: f64,
}

impl CriteriaWeights {
    pub fn total(&self) -> f64 {
        self.coherence + self.alignment + self.groundedness + self.completeness + self.citation
    }
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        Self {
            coherence: defaults::DEFAULT_WEIGHT_COHERENCE,
            alignment: defaults::DEFAULT_WEIGHT_ALIGNMENT,
            groundedness: defaults::DEFAULT_WEIGHT_GROUNDEDNESS,
            completeness: defaults::DEFAULT_WEIGHT_COMPLETENESS,
            citation: defaults::DEFAULT_WEIGHT_CITATION,
        }
    }
}

/// Validator unit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum weighted score for a response to pass.
    pub pass_threshold: f64,
    /// Minimum source-alignment score.
    pub min_alignment: f64,
    /// Minimum groundedness score; below it the response counts as fabricated.
    pub min_groundedness: f64,
    /// Fail responses that used documents but cite none of them.
    pub require_citations: bool,
    pub weights: CriteriaWeights,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            pass_threshold: defaults::DEFAULT_PASS_THRESHOLD,
            min_alignment: defaults::DEFAULT_MIN_ALIGNMENT,
            min_groundedness: defaults::DEFAULT_MIN_GROUNDEDNESS,
            require_citations: defaults::DEFAULT_REQUIRE_CITATIONS,
            weights: CriteriaWeights::default(),
        }
    }
}
