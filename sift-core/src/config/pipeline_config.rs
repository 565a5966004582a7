use serde::{Deserialize, Serialize};

use super::defaults;

/// Orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Total generation attempts allowed per query (first attempt included).
    pub max_regeneration_attempts: u32,
    /// Write every finished trace to `trace_dir`.
    pub persist_traces: bool,
    pub trace_dir: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_regeneration_attempts: defaults::DEFAULT_MAX_REGENERATION_ATTEMPTS,
            persist_traces: defaults::DEFAULT_PERSIST_TRACES,
            trace_dir: defaults::DEFAULT_TRACE_DIR.to_string(),
        }
    }
}
