use proptest::prelude::*;
use sift_core::RetrievedDocument;
use sift_retrieval::rank::{dedupe, rank_and_filter};

fn docs_strategy() -> impl Strategy<Value = Vec<RetrievedDocument>> {
    prop::collection::vec(("[a-d]{1,3}", 0.0f64..1.0), 0..20).prop_map(|items| {
        items
            .into_iter()
            .map(|(content, score)| RetrievedDocument::new(content, score))
            .collect()
    })
}

proptest! {
    #[test]
    fn ranked_output_is_sorted_and_above_threshold(docs in docs_strategy(), threshold in 0.0f64..1.0) {
        let ranked = rank_and_filter(docs.clone(), threshold);
        prop_assert!(ranked.len() <= docs.len());
        prop_assert!(ranked.iter().all(|d| d.relevance_score >= threshold));
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
    }

    #[test]
    fn dedupe_leaves_unique_contents(docs in docs_strategy()) {
        let unique = dedupe(docs);
        let mut contents: Vec<&str> = unique.iter().map(|d| d.content.as_str()).collect();
        let before = contents.len();
        contents.sort_unstable();
        contents.dedup();
        prop_assert_eq!(contents.len(), before);
    }
}
