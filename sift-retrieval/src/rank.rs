//! Ranking and filtering of retrieved documents.

use std::cmp::Ordering;
use std::collections::HashSet;

use sift_core::RetrievedDocument;

/// Drop documents under `threshold`, then sort by relevance, highest first.
///
/// The sort is stable: equal scores keep their retrieval order.
/// Non-finite scores sort last and never pass a positive threshold.
pub fn rank_and_filter(documents: Vec<RetrievedDocument>, threshold: f64) -> Vec<RetrievedDocument> {
    let mut kept: Vec<RetrievedDocument> = documents
        .into_iter()
        .filter(|d| d.relevance_score.is_finite() && d.relevance_score >= threshold)
        .collect();
    kept.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
    });
    kept
}

/// Remove documents whose content was already seen, keeping the first.
pub fn dedupe(documents: Vec<RetrievedDocument>) -> Vec<RetrievedDocument> {
    let mut seen = HashSet::new();
    documents
        .into_iter()
        .filter(|d| seen.insert(d.fingerprint()))
        .collect()
}
