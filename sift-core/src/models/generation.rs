use serde::{Deserialize, Serialize};

use super::document::SourceRef;
use crate::intent::Intent;

/// One generation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub response_text: String,
    pub used_retrieval: bool,
    pub document_count: usize,
    pub intent: Intent,
    /// Citation labels available to the response, in document order.
    pub sources: Vec<SourceRef>,
}

impl GenerationResult {
    /// Degraded, non-empty result describing a generation failure.
    pub fn degraded(intent: Intent, failure: &str) -> Self {
        Self {
            response_text: format!(
                "An answer could not be generated because the language model failed: {failure}"
            ),
            used_retrieval: false,
            document_count: 0,
            intent,
            sources: Vec::new(),
        }
    }
}

/// Append a "Sources consulted" section listing each cited document.
pub fn render_with_sources(response: &str, sources: &[SourceRef]) -> String {
    if sources.is_empty() {
        return response.to_string();
    }

    let mut out = String::from(response);
    out.push_str("\n\n--- Sources consulted ---\n");
    for source in sources {
        out.push_str(&format!("• {}: {}", source.label, source.source));
        if let Some(chunk) = &source.chunk_index {
            out.push_str(&format!(" (chunk {chunk})"));
        }
        out.push('\n');
    }
    out
}
