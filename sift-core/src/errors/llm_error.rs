/// Language-model backend errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request to {backend} failed: {reason}")]
    RequestFailed { backend: String, reason: String },

    #[error("{backend} returned status {status}: {body}")]
    BadStatus {
        backend: String,
        status: u16,
        body: String,
    },

    #[error("{backend} returned an empty response")]
    EmptyResponse { backend: String },

    #[error("malformed model output: {reason}")]
    MalformedOutput { reason: String },

    #[error("backend unavailable: {backend}")]
    Unavailable { backend: String },
}
