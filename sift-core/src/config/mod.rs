mod classifier_config;
pub mod defaults;
mod generation_config;
mod llm_config;
mod observability_config;
mod pipeline_config;
mod retrieval_config;
mod validation_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use classifier_config::{ClassifierConfig, ClassifierStrategy};
pub use generation_config::GenerationConfig;
pub use llm_config::{BackendProfile, BackendRole, LlmConfig, UnitRoles};
pub use observability_config::ObservabilityConfig;
pub use pipeline_config::PipelineConfig;
pub use retrieval_config::{RetrievalConfig, RetrievalMode, SearchProfile};
pub use validation_config::{CriteriaWeights, ValidationConfig};

use crate::errors::{ConfigError, SiftResult};

/// Top-level configuration. Constructed once and handed to each unit's
/// constructor; nothing reads configuration from global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    pub llm: LlmConfig,
    pub classifier: ClassifierConfig,
    pub retrieval: RetrievalConfig,
    pub generation: GenerationConfig,
    pub validation: ValidationConfig,
    pub pipeline: PipelineConfig,
    pub observability: ObservabilityConfig,
}

impl SiftConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml(source: &str) -> SiftResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> SiftResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&source)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> SiftResult<()> {
        if self.pipeline.max_regeneration_attempts == 0 {
            return Err(invalid(
                "pipeline.max_regeneration_attempts",
                "must allow at least one attempt",
            ));
        }

        for (field, value) in [
            ("classifier.fallback_confidence", self.classifier.fallback_confidence),
            ("validation.pass_threshold", self.validation.pass_threshold),
            ("validation.min_alignment", self.validation.min_alignment),
            ("validation.min_groundedness", self.validation.min_groundedness),
            ("retrieval.search.score_threshold", self.retrieval.search.score_threshold),
            ("retrieval.summary.score_threshold", self.retrieval.summary.score_threshold),
            (
                "retrieval.comparison.score_threshold",
                self.retrieval.comparison.score_threshold,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, &format!("{value} is outside [0, 1]")));
            }
        }

        for (field, k) in [
            ("retrieval.search.k", self.retrieval.search.k),
            ("retrieval.summary.k", self.retrieval.summary.k),
            ("retrieval.comparison.k", self.retrieval.comparison.k),
        ] {
            if k == 0 {
                return Err(invalid(field, "must request at least one document"));
            }
        }

        if self.retrieval.planner_step_budget == 0 {
            return Err(invalid(
                "retrieval.planner_step_budget",
                "must allow at least one action",
            ));
        }

        let total = self.validation.weights.total();
        if (total - 1.0).abs() > 1e-6 {
            return Err(invalid(
                "validation.weights",
                &format!("weights sum to {total:.3}, expected 1.0"),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> crate::errors::SiftError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
