mod classification;
mod document;
mod execution_trace;
mod generation;
mod prompt;
mod validation_result;

pub use classification::Classification;
pub use document::{RetrievedDocument, SourceRef};
pub use execution_trace::{
    Component, ExecutionTrace, RunStatus, StepAction, TraceStep, TraceSummary,
};
pub use generation::{render_with_sources, GenerationResult};
pub use prompt::Prompt;
pub use validation_result::{CriteriaScores, ValidationResult};
