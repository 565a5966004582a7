/// sift version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Response returned when retrieval finds nothing to ground an answer on.
pub const NO_EVIDENCE_RESPONSE: &str =
    "I could not find relevant documents to answer your question. Try rephrasing it.";

/// Response returned when a run is abandoned through its cancellation token.
pub const CANCELLED_RESPONSE: &str = "The query was cancelled before an answer was produced.";

/// Prefix of the user-facing message when the pipeline hits an unexpected failure.
pub const ERROR_RESPONSE_PREFIX: &str = "Sorry, something went wrong while processing your query";

/// Metadata key holding a document's origin (file name, URL).
pub const SOURCE_METADATA_KEY: &str = "source";

/// Metadata key holding a document's chunk position inside its origin.
pub const CHUNK_INDEX_METADATA_KEY: &str = "chunk_index";

/// Characters of a document fingerprint kept in trace payloads.
pub const FINGERPRINT_LEN: usize = 12;
