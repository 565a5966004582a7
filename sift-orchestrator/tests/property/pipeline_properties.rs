use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use sift_core::config::PipelineConfig;
use sift_core::models::{Component, StepAction};
use sift_core::{Intent, RetrievedDocument};
use sift_orchestrator::Orchestrator;
use test_fixtures::{
    load_documents, CountingValidator, FixedClassifier, RecordingRetriever, ScriptedGenerator,
};

fn intent_strategy() -> impl Strategy<Value = Intent> {
    prop::sample::select(Intent::ALL.to_vec())
}

fn build(
    intent: Intent,
    documents: Vec<RetrievedDocument>,
    verdicts: &[bool],
    generator: Arc<ScriptedGenerator>,
) -> Orchestrator {
    let verdicts = verdicts
        .iter()
        .map(|ok| {
            if *ok {
                CountingValidator::pass()
            } else {
                CountingValidator::fail()
            }
        })
        .collect();
    Orchestrator::new(
        Arc::new(FixedClassifier::intent(intent)),
        Arc::new(RecordingRetriever::new(documents)),
        generator,
        Arc::new(CountingValidator::new(verdicts)),
        PipelineConfig::default(),
    )
}

proptest! {
    #[test]
    fn attempts_and_pairs_stay_within_the_cap(
        intent in intent_strategy(),
        doc_count in 0usize..=5,
        verdicts in prop::collection::vec(any::<bool>(), 1..6),
        cap in 1u32..=5,
    ) {
        let documents: Vec<RetrievedDocument> =
            load_documents("rust_handbook").into_iter().take(doc_count).collect();
        let responses: Vec<String> = (1..=6).map(|n| format!("answer {n} [Source 1]")).collect();
        let generator = Arc::new(ScriptedGenerator::new(responses));
        let result = build(intent, documents, &verdicts, generator.clone())
            .process_query("q", Some(cap));
        let trace = &result.trace;

        prop_assert!(!trace.steps.is_empty());
        let indexes: Vec<usize> = trace.steps.iter().map(|s| s.index).collect();
        prop_assert_eq!(indexes, (1..=trace.steps.len()).collect::<Vec<_>>());

        let from_steps: BTreeSet<Component> = trace
            .steps
            .iter()
            .map(|s| s.component)
            .filter(Component::is_unit)
            .collect();
        prop_assert_eq!(&from_steps, &trace.agents_called);

        if intent == Intent::General {
            prop_assert_eq!(trace.count_action(StepAction::Retrieve), 0);
            prop_assert_eq!(trace.count_action(StepAction::Validate), 0);
            prop_assert_eq!(result.attempts, 1);
        } else if doc_count == 0 {
            prop_assert_eq!(trace.count_action(StepAction::Generate), 0);
            prop_assert_eq!(trace.count_action(StepAction::Validate), 0);
            prop_assert_eq!(result.attempts, 0);
            prop_assert_eq!(result.documents_used, 0);
        } else {
            let expected = match verdicts.iter().position(|ok| *ok) {
                Some(i) => (i as u32 + 1).min(cap),
                None => cap,
            };
            let passed = verdicts
                .get(expected as usize - 1)
                .copied()
                .unwrap_or(*verdicts.last().unwrap());
            prop_assert_eq!(trace.count_action(StepAction::Exhausted), usize::from(!passed));
            prop_assert!(result.attempts >= 1 && result.attempts <= cap);
            prop_assert_eq!(result.attempts, expected);
            prop_assert_eq!(trace.generation_validation_pairs(), expected as usize);
            prop_assert_eq!(trace.regeneration_count, expected - 1);
            prop_assert_eq!(result.response, format!("answer {expected} [Source 1]"));
            prop_assert_eq!(result.documents_used, doc_count);

            let seen = generator.seen_documents();
            prop_assert!(seen.windows(2).all(|w| w[0] == w[1]));
        }
    }
}
