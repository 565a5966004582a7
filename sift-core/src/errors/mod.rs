mod config_error;
mod llm_error;
mod pipeline_error;
mod retrieval_error;
mod trace_error;

pub use config_error::ConfigError;
pub use llm_error::LlmError;
pub use pipeline_error::PipelineError;
pub use retrieval_error::RetrievalError;
pub use trace_error::TraceError;

/// Top-level error for the sift workspace.
#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    #[error("language model error: {0}")]
    LlmError(#[from] LlmError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("trace error: {0}")]
    TraceError(#[from] TraceError),

    #[error("pipeline error: {0}")]
    PipelineError(#[from] PipelineError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("degraded mode: {component} using fallback {fallback}")]
    DegradedMode { component: String, fallback: String },
}

pub type SiftResult<T> = Result<T, SiftError>;
