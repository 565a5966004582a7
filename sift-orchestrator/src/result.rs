use serde::{Deserialize, Serialize};
use sift_core::models::{render_with_sources, RunStatus, SourceRef};
use sift_core::{Classification, ExecutionTrace, Intent, ValidationResult};

/// What the caller gets back from one run. The shape is the same for every
/// terminal state; only the content differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub run_id: String,
    pub status: RunStatus,
    pub response: String,
    /// Classified intent, or `general` when the run stopped before classification.
    pub intent: Intent,
    pub classification: Option<Classification>,
    /// Documents behind the returned response.
    pub documents_used: usize,
    pub sources: Vec<SourceRef>,
    /// Verdict on the returned response, when it was validated.
    pub validation: Option<ValidationResult>,
    /// Generation attempts made.
    pub attempts: u32,
    pub trace: ExecutionTrace,
}

impl QueryResult {
    /// The response followed by its "Sources consulted" section.
    pub fn formatted_response(&self) -> String {
        render_with_sources(&self.response, &self.sources)
    }

    pub fn needs_regeneration(&self) -> bool {
        self.validation
            .as_ref()
            .is_some_and(|v| v.needs_regeneration)
    }
}
