use crate::errors::SiftResult;
use crate::models::ExecutionTrace;

/// Persistence side channel for finished traces.
pub trait ITraceSink: Send + Sync {
    /// Persist one trace, returning where it went (a path or an id).
    fn save(&self, trace: &ExecutionTrace) -> SiftResult<String>;

    /// Persist several traces as one document.
    fn export_batch(&self, traces: &[ExecutionTrace], name: &str) -> SiftResult<String>;
}
