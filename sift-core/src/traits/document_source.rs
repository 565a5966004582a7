use std::collections::BTreeMap;

use crate::errors::SiftResult;
use crate::models::RetrievedDocument;

/// Exact-match constraints on document metadata.
pub type MetadataFilter = BTreeMap<String, String>;

/// Similarity search over an indexed document collection.
pub trait IDocumentSource: Send + Sync {
    /// Up to `k` documents relevant to `query`, scored in [0, 1].
    /// Documents scoring below `threshold` may be omitted.
    fn search(&self, query: &str, k: usize, threshold: f64) -> SiftResult<Vec<RetrievedDocument>>;

    /// Up to `k` documents whose metadata matches every entry of `filter`.
    fn search_by_metadata(
        &self,
        _filter: &MetadataFilter,
        _k: usize,
    ) -> SiftResult<Vec<RetrievedDocument>> {
        Ok(Vec::new())
    }

    /// Whether the collection is loaded and searchable.
    fn is_ready(&self) -> bool {
        true
    }
}
