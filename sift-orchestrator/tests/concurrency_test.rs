use std::sync::Arc;
use std::thread;

use sift_core::config::PipelineConfig;
use sift_core::models::RunStatus;
use sift_core::Intent;
use sift_observability::TraceStore;
use sift_orchestrator::Orchestrator;
use test_fixtures::{
    load_documents, CountingValidator, FixedClassifier, RecordingRetriever, ScriptedGenerator,
};

#[test]
fn concurrent_runs_share_only_the_trace_store() {
    let store = TraceStore::new();
    let pipeline = Arc::new(
        Orchestrator::new(
            Arc::new(FixedClassifier::intent(Intent::Search)),
            Arc::new(RecordingRetriever::new(load_documents("rust_handbook"))),
            Arc::new(ScriptedGenerator::new(Vec::<String>::new())),
            Arc::new(CountingValidator::passing()),
            PipelineConfig::default(),
        )
        .with_trace_store(store.clone()),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || {
                (0..5)
                    .map(|j| pipeline.process_query(&format!("query {i}-{j}"), None))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(results.len(), 40);
    assert_eq!(store.len(), 40);
    for result in &results {
        assert_eq!(result.status, RunStatus::Answered);
        let stored = store.get(&result.run_id).unwrap();
        assert_eq!(stored.query, result.trace.query);
        assert_eq!(stored.steps.len(), 4);
    }

    let stats = store.stats();
    assert_eq!(stats.total_runs, 40);
    assert_eq!(stats.by_status.get("answered"), Some(&40));
    assert_eq!(stats.total_regenerations, 0);
}
