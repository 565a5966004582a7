//! Balanced retrieval for comparison queries.

use std::sync::LazyLock;

use regex::Regex;
use sift_core::config::SearchProfile;
use sift_core::traits::IDocumentSource;
use sift_core::{RetrievedDocument, SiftResult};
use tracing::debug;

use crate::rank::dedupe;

/// Two-concept comparison phrasings, English and Spanish. Group 1 and 2 are the concepts.
static COMPARISON_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)differences?\s+between\s+(.+?)\s+and\s+(.+)",
        r"(?i)compare\s+(.+?)\s+(?:and|with|to|against)\s+(.+)",
        r"(?i)diferencias?\s+entre\s+(.+?)\s+y\s+(.+)",
        r"(?i)compara(?:r)?\s+(.+?)\s+(?:y|con)\s+(.+)",
        r"(?i)(.+?)\s+(?:vs\.?|versus)\s+(.+)",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// The concepts a comparison query contrasts, or an empty list when the
/// phrasing is not recognized.
pub fn extract_concepts(query: &str) -> Vec<String> {
    for pattern in COMPARISON_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(query) {
            let concepts: Vec<String> = [caps.get(1), caps.get(2)]
                .into_iter()
                .flatten()
                .map(|m| clean_concept(m.as_str()))
                .filter(|c| !c.is_empty())
                .collect();
            if concepts.len() == 2 {
                return concepts;
            }
        }
    }
    Vec::new()
}

fn clean_concept(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| matches!(c, '?' | '¿' | '!' | '¡' | '.' | ',' | ':' | ';' | '"'))
        .trim()
        .to_string()
}

/// Search each concept with an equal share of `k`, interleave the per-concept
/// lists round-robin, deduplicate, and top up from the literal query.
pub fn balanced_search(
    source: &dyn IDocumentSource,
    query: &str,
    concepts: &[String],
    profile: SearchProfile,
) -> SiftResult<Vec<RetrievedDocument>> {
    let share = profile.k.div_ceil(concepts.len().max(1)).max(1);

    let mut per_concept = Vec::with_capacity(concepts.len());
    for concept in concepts {
        let found = source.search(concept, share, profile.score_threshold)?;
        debug!(concept = %concept, found = found.len(), "concept searched");
        per_concept.push(found);
    }

    let mut interleaved = Vec::new();
    let longest = per_concept.iter().map(Vec::len).max().unwrap_or(0);
    for i in 0..longest {
        for list in &per_concept {
            if let Some(doc) = list.get(i) {
                interleaved.push(doc.clone());
            }
        }
    }

    let mut balanced = dedupe(interleaved);
    if balanced.len() < profile.k {
        let extra = source.search(query, profile.k, profile.score_threshold)?;
        balanced.extend(extra);
        balanced = dedupe(balanced);
    }
    balanced.truncate(profile.k);
    Ok(balanced)
}
