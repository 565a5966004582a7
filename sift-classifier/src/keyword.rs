//! Offline intent classification from keyword tables.

use sift_core::traits::IClassifier;
use sift_core::{Classification, Intent};

/// Keyword patterns mapped to intents. English and Spanish.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Comparison,
        &[
            "compare",
            "comparison",
            " vs ",
            " vs.",
            "versus",
            "difference",
            "differences",
            "better than",
            "compara",
            "diferencia",
            "diferencias",
        ],
    ),
    (
        Intent::Summary,
        &[
            "summarize",
            "summarise",
            "summary",
            "overview",
            "tldr",
            "recap",
            "resume",
            "resumen",
            "resumir",
        ],
    ),
    (
        Intent::General,
        &[
            "hello",
            " hi ",
            " hey",
            "thanks",
            "thank you",
            "how are you",
            "joke",
            "good morning",
            "hola",
            "gracias",
            "chiste",
        ],
    ),
];

/// Confidence reported when at least one keyword matched.
const MATCH_CONFIDENCE: f64 = 0.7;
/// Confidence of the default `search` classification.
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Classifier that needs no backend.
///
/// Priority: keyword matching > default (`search`).
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl IClassifier for KeywordClassifier {
    fn classify(&self, query: &str) -> Classification {
        // Pad so word-boundary patterns like " vs " match at the edges.
        let query_lower = format!(" {} ", query.to_lowercase());

        let mut best_intent = Intent::Search;
        let mut best_score = 0usize;

        for &(intent, keywords) in INTENT_KEYWORDS {
            let score = keywords
                .iter()
                .filter(|kw| query_lower.contains(**kw))
                .count();
            if score > best_score {
                best_score = score;
                best_intent = intent;
            }
        }

        if best_score > 0 {
            return Classification::new(
                best_intent,
                MATCH_CONFIDENCE,
                best_intent.needs_documents(),
                format!("{best_score} keyword match(es) for {best_intent}"),
            );
        }

        Classification::new(
            Intent::Search,
            DEFAULT_CONFIDENCE,
            true,
            "no keyword matched, defaulting to search",
        )
    }

    fn uses_model(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vs_matches_only_as_a_word() {
        let c = KeywordClassifier.classify("rust vs go");
        assert_eq!(c.intent, Intent::Comparison);
        let c = KeywordClassifier.classify("canvas painting tips");
        assert_eq!(c.intent, Intent::Search);
    }
}
