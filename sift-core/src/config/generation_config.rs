use serde::{Deserialize, Serialize};

use super::defaults;

/// Generator unit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Document content longer than this is truncated inside prompts.
    pub max_document_chars: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_document_chars: defaults::DEFAULT_MAX_DOCUMENT_CHARS,
        }
    }
}
