/// Orchestrator-level failures. These are the only errors allowed to end a
/// run early, and they are always converted into a terminal result.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("run cancelled before {stage}")]
    Cancelled { stage: String },

    #[error("{component} panicked: {message}")]
    UnitPanicked { component: String, message: String },

    #[error("invariant violated: {details}")]
    InvariantViolated { details: String },
}
