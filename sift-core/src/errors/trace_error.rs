/// Trace persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("failed to write trace to {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("failed to encode trace {run_id}: {reason}")]
    EncodeFailed { run_id: String, reason: String },
}
