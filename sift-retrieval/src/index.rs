//! In-memory lexical document index.
//!
//! Scores documents by term overlap with the query: the share of distinct
//! query terms that appear in the document. No embeddings, no external
//! services; useful for tests, demos, and air-gapped deployments.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::RwLock;

use serde::Deserialize;
use sift_core::errors::RetrievalError;
use sift_core::traits::{IDocumentSource, MetadataFilter};
use sift_core::{RetrievedDocument, SiftResult};
use tracing::info;

use crate::rank::rank_and_filter;

/// Words too common to say anything about relevance.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "was", "what", "which", "who", "how", "why", "when", "where",
    "does", "did", "with", "from", "that", "this", "about", "into", "than", "then", "there",
    "is", "of", "to", "in", "on", "an", "a", "it", "be", "do", "me", "tell", "give",
    "el", "la", "los", "las", "de", "del", "que", "en", "un", "una", "por", "con", "para", "es",
    "se", "su", "al", "lo", "como", "qué", "cuál",
];

struct IndexedDocument {
    content: String,
    metadata: BTreeMap<String, String>,
    terms: HashSet<String>,
}

#[derive(Default)]
struct IndexState {
    documents: Vec<IndexedDocument>,
    loaded: bool,
}

/// One record of a JSON corpus file.
#[derive(Deserialize)]
struct CorpusRecord {
    content: String,
    #[serde(default)]
    source_metadata: BTreeMap<String, String>,
}

/// Term-overlap document source held in memory.
#[derive(Default)]
pub struct MemoryIndex {
    state: RwLock<IndexState>,
}

/// Tokenize text into lowercase alphanumeric terms, dropping stopwords.
fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.chars().count() >= 2)
        .map(|s| s.to_lowercase())
        .filter(|s| !STOPWORDS.contains(&s.as_str()))
        .collect()
}

impl MemoryIndex {
    /// An empty, unloaded index. Searches return nothing until documents are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// An index loaded with `documents`. Their scores are ignored.
    pub fn from_documents(documents: Vec<RetrievedDocument>) -> Self {
        let index = Self::new();
        for doc in documents {
            index.add(doc.content, doc.source_metadata);
        }
        index.mark_loaded();
        index
    }

    /// Add one document and mark the index loaded.
    pub fn add(&self, content: impl Into<String>, metadata: BTreeMap<String, String>) {
        let content = content.into();
        let terms = tokenize(&content);
        if let Ok(mut state) = self.state.write() {
            state.documents.push(IndexedDocument {
                content,
                metadata,
                terms,
            });
            state.loaded = true;
        }
    }

    /// Load a JSON array of `{content, source_metadata}` records.
    /// Returns the number of documents added.
    pub fn load_json_file(&self, path: impl AsRef<Path>) -> SiftResult<usize> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| RetrievalError::IndexUnavailable {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        let records: Vec<CorpusRecord> = serde_json::from_str(&raw)?;
        let count = records.len();
        for record in records {
            self.add(record.content, record.source_metadata);
        }
        self.mark_loaded();
        info!(path = %path.display(), documents = count, "corpus loaded");
        Ok(count)
    }

    /// Drop every document and return to the unloaded state.
    pub fn clear(&self) {
        if let Ok(mut state) = self.state.write() {
            *state = IndexState::default();
        }
    }

    pub fn len(&self) -> usize {
        self.state.read().map(|s| s.documents.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn mark_loaded(&self) {
        if let Ok(mut state) = self.state.write() {
            state.loaded = true;
        }
    }

    fn read_state(&self) -> SiftResult<std::sync::RwLockReadGuard<'_, IndexState>> {
        self.state.read().map_err(|_| {
            RetrievalError::IndexUnavailable {
                reason: "index lock poisoned".to_string(),
            }
            .into()
        })
    }
}

fn to_document(doc: &IndexedDocument, score: f64) -> RetrievedDocument {
    RetrievedDocument {
        content: doc.content.clone(),
        source_metadata: doc.metadata.clone(),
        relevance_score: score,
    }
}

impl IDocumentSource for MemoryIndex {
    fn search(&self, query: &str, k: usize, threshold: f64) -> SiftResult<Vec<RetrievedDocument>> {
        let state = self.read_state()?;
        if !state.loaded {
            return Ok(Vec::new());
        }

        let query_terms = tokenize(query);
        if query_terms.is_empty() {
            return Ok(Vec::new());
        }

        let scored: Vec<RetrievedDocument> = state
            .documents
            .iter()
            .filter_map(|doc| {
                let overlap = query_terms.intersection(&doc.terms).count();
                (overlap > 0)
                    .then(|| to_document(doc, overlap as f64 / query_terms.len() as f64))
            })
            .collect();

        let mut ranked = rank_and_filter(scored, threshold);
        ranked.truncate(k);
        Ok(ranked)
    }

    fn search_by_metadata(
        &self,
        filter: &MetadataFilter,
        k: usize,
    ) -> SiftResult<Vec<RetrievedDocument>> {
        let state = self.read_state()?;
        Ok(state
            .documents
            .iter()
            .filter(|doc| {
                filter
                    .iter()
                    .all(|(key, value)| doc.metadata.get(key) == Some(value))
            })
            .take(k)
            .map(|doc| to_document(doc, 1.0))
            .collect())
    }

    fn is_ready(&self) -> bool {
        self.state.read().map(|s| s.loaded).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_drops_stopwords_and_short_terms() {
        let terms = tokenize("What is the Borrow-Checker, x?");
        assert!(terms.contains("borrow"));
        assert!(terms.contains("checker"));
        assert!(!terms.contains("what"));
        assert!(!terms.contains("x"));
    }
}
