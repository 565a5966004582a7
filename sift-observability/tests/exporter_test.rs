use std::collections::BTreeSet;

use chrono::Utc;
use serde_json::json;
use sift_core::models::{Component, RunStatus, StepAction, TraceStep, TraceSummary};
use sift_core::traits::ITraceSink;
use sift_core::ExecutionTrace;
use sift_observability::JsonTraceExporter;

fn make_trace(run_id: &str, intent: &str) -> ExecutionTrace {
    let now = Utc::now();
    let steps = vec![
        TraceStep {
            index: 1,
            component: Component::Classifier,
            action: StepAction::Classify,
            payload_summary: json!({ "intent": intent }),
            timestamp: now,
        },
        TraceStep {
            index: 2,
            component: Component::Retriever,
            action: StepAction::Retrieve,
            payload_summary: json!({ "strategy": "direct", "document_count": 3 }),
            timestamp: now,
        },
    ];
    ExecutionTrace {
        run_id: run_id.to_string(),
        query: "what is ownership?".to_string(),
        status: RunStatus::Answered,
        incomplete: false,
        started_at: now,
        finished_at: now,
        regeneration_count: 0,
        agents_called: BTreeSet::from([Component::Classifier, Component::Retriever]),
        final_response: "answer".to_string(),
        summary: TraceSummary {
            duration_ms: 40,
            step_count: 2,
            model_calls: 1,
            documents_retrieved: 3,
            regeneration_count: 0,
        },
        steps,
    }
}

#[test]
fn save_writes_a_readable_trace_file() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = JsonTraceExporter::new(dir.path().join("traces"));

    let trace = make_trace("run-42", "search");
    let path = exporter.save(&trace).unwrap();

    assert!(path.contains("trace_run-42_"));
    assert!(path.ends_with(".json"));
    let contents = std::fs::read_to_string(&path).unwrap();
    let back: ExecutionTrace = serde_json::from_str(&contents).unwrap();
    assert_eq!(back, trace);
}

#[test]
fn export_batch_writes_one_document_with_summary() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = JsonTraceExporter::new(dir.path());

    let traces = vec![make_trace("a", "search"), make_trace("b", "summary"), make_trace("c", "search")];
    let path = exporter.export_batch(&traces, "nightly").unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["batch_name"], "nightly");
    assert_eq!(doc["total_traces"], 3);
    assert_eq!(doc["traces"].as_array().unwrap().len(), 3);
    assert_eq!(doc["summary"]["intents"]["search"], 2);
    assert_eq!(doc["summary"]["intents"]["summary"], 1);
    assert_eq!(doc["summary"]["strategies"]["direct"], 3);
    assert_eq!(doc["summary"]["total_documents_retrieved"], 9);
}

#[test]
fn unwritable_directory_is_a_trace_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();

    let exporter = JsonTraceExporter::new(blocker.join("traces"));
    let err = exporter.save(&make_trace("x", "search")).unwrap_err();
    assert!(err.to_string().contains("failed to write trace"));
}

#[test]
fn batch_name_cannot_escape_the_export_directory() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("traces");
    let exporter = JsonTraceExporter::new(&dir);

    let path = exporter.export_batch(&[make_trace("a", "search")], "../escaped").unwrap();

    let written = std::path::Path::new(&path);
    assert_eq!(written.parent().unwrap(), dir.as_path());
    let file_name = written.file_name().unwrap().to_str().unwrap();
    assert!(file_name.starts_with("___escaped_"));
    let entries: Vec<_> = std::fs::read_dir(root.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
