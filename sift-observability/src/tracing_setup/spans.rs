//! Span definitions per pipeline stage: classification, retrieval,
//! generation, validation, and the whole run.

/// Create a span around one pipeline run.
#[macro_export]
macro_rules! pipeline_span {
    ($run_id:expr) => {
        tracing::info_span!("sift.pipeline", run_id = %$run_id)
    };
}

/// Create a classification span.
#[macro_export]
macro_rules! classify_span {
    ($query_len:expr) => {
        tracing::info_span!("sift.classify", query_len = $query_len)
    };
}

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr, $intent:expr) => {
        tracing::info_span!("sift.retrieval", query = %$query, intent = %$intent)
    };
}

/// Create a generation span.
#[macro_export]
macro_rules! generation_span {
    ($intent:expr, $document_count:expr) => {
        tracing::info_span!("sift.generation", intent = %$intent, document_count = $document_count)
    };
}

/// Create a validation span.
#[macro_export]
macro_rules! validation_span {
    ($document_count:expr) => {
        tracing::info_span!("sift.validation", document_count = $document_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PIPELINE: &str = "sift.pipeline";
    pub const CLASSIFY: &str = "sift.classify";
    pub const RETRIEVAL: &str = "sift.retrieval";
    pub const GENERATION: &str = "sift.generation";
    pub const VALIDATION: &str = "sift.validation";
}
