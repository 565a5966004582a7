/// Document source and retrieval errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("document index unavailable: {reason}")]
    IndexUnavailable { reason: String },
}
