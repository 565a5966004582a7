use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{CHUNK_INDEX_METADATA_KEY, FINGERPRINT_LEN, SOURCE_METADATA_KEY};

/// A ranked document returned by retrieval. Never mutated after retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub content: String,
    pub source_metadata: BTreeMap<String, String>,
    /// Similarity score reported by the document source (higher is better).
    pub relevance_score: f64,
}

impl RetrievedDocument {
    pub fn new(content: impl Into<String>, relevance_score: f64) -> Self {
        Self {
            content: content.into(),
            source_metadata: BTreeMap::new(),
            relevance_score,
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.source_metadata.insert(key.into(), value.into());
        self
    }

    /// Origin of the document, or `"unknown"`.
    pub fn source(&self) -> &str {
        self.source_metadata
            .get(SOURCE_METADATA_KEY)
            .map(String::as_str)
            .unwrap_or("unknown")
    }

    pub fn chunk_index(&self) -> Option<&str> {
        self.source_metadata
            .get(CHUNK_INDEX_METADATA_KEY)
            .map(String::as_str)
    }

    /// Short content hash identifying the document in traces.
    pub fn fingerprint(&self) -> String {
        let hash = blake3::hash(self.content.as_bytes()).to_hex();
        hash[..FINGERPRINT_LEN].to_string()
    }
}

/// A citation label and the document it points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Label used inside the response, e.g. `Source 2`.
    pub label: String,
    pub source: String,
    pub chunk_index: Option<String>,
}

impl SourceRef {
    /// Number the documents the way the generator cites them (1-based).
    pub fn from_documents(documents: &[RetrievedDocument]) -> Vec<SourceRef> {
        documents
            .iter()
            .enumerate()
            .map(|(idx, doc)| SourceRef {
                label: format!("Source {}", idx + 1),
                source: doc.source().to_string(),
                chunk_index: doc.chunk_index().map(str::to_string),
            })
            .collect()
    }
}
