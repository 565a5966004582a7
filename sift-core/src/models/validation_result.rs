use serde::{Deserialize, Serialize};

use crate::config::CriteriaWeights;

/// Per-criterion scores reported by the validator model, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriteriaScores {
    /// Logical structure and flow.
    pub coherence: f64,
    /// Fidelity to the supplied documents.
    pub alignment: f64,
    /// Absence of fabricated claims (1.0 = nothing invented).
    pub groundedness: f64,
    /// How fully the question is answered.
    pub completeness: f64,
    /// Presence and accuracy of source citations.
    pub citation: f64,
}

impl CriteriaScores {
    /// Weighted overall score, rounded to three decimals.
    pub fn weighted(&self, weights: &CriteriaWeights) -> f64 {
        let overall = self.coherence * weights.coherence
            + self.alignment * weights.alignment
            + self.groundedness * weights.groundedness
            + self.completeness * weights.completeness
            + self.citation * weights.citation;
        (overall * 1000.0).round() / 1000.0
    }

    /// Clamp every score into [0, 1]; non-finite values become 0.
    pub fn clamped(self) -> Self {
        let c = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            coherence: c(self.coherence),
            alignment: c(self.alignment),
            groundedness: c(self.groundedness),
            completeness: c(self.completeness),
            citation: c(self.citation),
        }
    }
}

/// Verdict on one generation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Weighted overall score in [0, 1].
    pub confidence_score: f64,
    /// Always `!is_valid`.
    pub needs_regeneration: bool,
    pub issues: Vec<String>,
    pub criteria: Option<CriteriaScores>,
    pub assessment: Option<String>,
}

impl ValidationResult {
    /// Build a verdict; `needs_regeneration` is derived from `is_valid`.
    pub fn new(
        is_valid: bool,
        confidence_score: f64,
        issues: Vec<String>,
        criteria: Option<CriteriaScores>,
        assessment: Option<String>,
    ) -> Self {
        Self {
            is_valid,
            confidence_score: confidence_score.clamp(0.0, 1.0),
            needs_regeneration: !is_valid,
            issues,
            criteria,
            assessment,
        }
    }

    /// Fail-closed verdict: a response with no supporting documents is never valid.
    pub fn no_evidence() -> Self {
        Self::new(
            false,
            0.0,
            vec!["no supporting documents were supplied".to_string()],
            None,
            None,
        )
    }

    /// Fail-open verdict: the validator itself is unavailable, so the response
    /// is accepted to guarantee the regeneration loop terminates.
    pub fn validator_unavailable(failure: &str) -> Self {
        Self::new(
            true,
            0.5,
            vec![format!("validation skipped, validator unavailable: {failure}")],
            None,
            None,
        )
    }
}
