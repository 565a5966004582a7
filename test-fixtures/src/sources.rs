//! Document source doubles.

use std::sync::Mutex;

use sift_core::errors::RetrievalError;
use sift_core::traits::{IDocumentSource, MetadataFilter};
use sift_core::{RetrievedDocument, SiftResult};

/// Returns a fixed document set for every query, honoring `k` and `threshold`.
/// Records each search key it receives.
pub struct StaticSource {
    documents: Vec<RetrievedDocument>,
    fail: bool,
    queries: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn new(documents: Vec<RetrievedDocument>) -> Self {
        Self {
            documents,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// A source whose searches always error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    /// Search keys received so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl IDocumentSource for StaticSource {
    fn search(&self, query: &str, k: usize, threshold: f64) -> SiftResult<Vec<RetrievedDocument>> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(RetrievalError::SearchFailed {
                reason: "static source configured to fail".to_string(),
            }
            .into());
        }
        Ok(self
            .documents
            .iter()
            .filter(|d| d.relevance_score >= threshold)
            .take(k)
            .cloned()
            .collect())
    }

    fn search_by_metadata(
        &self,
        filter: &MetadataFilter,
        k: usize,
    ) -> SiftResult<Vec<RetrievedDocument>> {
        if self.fail {
            return Err(RetrievalError::SearchFailed {
                reason: "static source configured to fail".to_string(),
            }
            .into());
        }
        Ok(self
            .documents
            .iter()
            .filter(|d| {
                filter
                    .iter()
                    .all(|(key, value)| d.source_metadata.get(key) == Some(value))
            })
            .take(k)
            .cloned()
            .collect())
    }
}
