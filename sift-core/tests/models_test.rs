use std::collections::BTreeSet;

use chrono::Utc;
use serde_json::json;
use sift_core::config::CriteriaWeights;
use sift_core::models::*;
use sift_core::Intent;

fn step(index: usize, component: Component, action: StepAction) -> TraceStep {
    TraceStep {
        index,
        component,
        action,
        payload_summary: json!({ "model_calls": 1 }),
        timestamp: Utc::now(),
    }
}

fn trace_with(steps: Vec<TraceStep>) -> ExecutionTrace {
    let now = Utc::now();
    let agents_called: BTreeSet<Component> = steps
        .iter()
        .map(|s| s.component)
        .filter(Component::is_unit)
        .collect();
    ExecutionTrace {
        run_id: "run-1".into(),
        query: "what is rust?".into(),
        status: RunStatus::Answered,
        incomplete: false,
        started_at: now,
        finished_at: now,
        regeneration_count: 0,
        agents_called,
        final_response: "answer".into(),
        summary: TraceSummary {
            duration_ms: 0,
            step_count: steps.len(),
            model_calls: steps.iter().map(TraceStep::model_calls).sum(),
            documents_retrieved: 0,
            regeneration_count: 0,
        },
        steps,
    }
}

// ─── Classification ───

#[test]
fn classification_clamps_confidence() {
    assert_eq!(Classification::new(Intent::Search, 1.7, true, "").confidence, 1.0);
    assert_eq!(Classification::new(Intent::Search, -0.2, true, "").confidence, 0.0);
    assert_eq!(Classification::new(Intent::Search, f64::NAN, true, "").confidence, 0.0);
}

#[test]
fn general_never_requires_retrieval() {
    let c = Classification::new(Intent::General, 0.9, true, "chit-chat");
    assert!(!c.requires_retrieval);
}

#[test]
fn fallback_classification_is_search_with_failure_rationale() {
    let c = Classification::fallback(0.5, "timeout");
    assert_eq!(c.intent, Intent::Search);
    assert_eq!(c.confidence, 0.5);
    assert!(c.requires_retrieval);
    assert!(c.rationale.contains("timeout"));
}

#[test]
fn unrecognized_label_becomes_general() {
    let c = Classification::unrecognized("poetry", 0.8);
    assert_eq!(c.intent, Intent::General);
    assert!(!c.requires_retrieval);
    assert!(c.rationale.contains("poetry"));
}

// ─── Documents ───

#[test]
fn document_source_defaults_to_unknown() {
    let doc = RetrievedDocument::new("text", 0.4);
    assert_eq!(doc.source(), "unknown");
    assert_eq!(doc.chunk_index(), None);

    let doc = doc.with_metadata("source", "guide.pdf").with_metadata("chunk_index", "3");
    assert_eq!(doc.source(), "guide.pdf");
    assert_eq!(doc.chunk_index(), Some("3"));
}

#[test]
fn fingerprint_is_stable_and_short() {
    let a = RetrievedDocument::new("same content", 0.1);
    let b = RetrievedDocument::new("same content", 0.9);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.fingerprint().len(), 12);
    assert_ne!(a.fingerprint(), RetrievedDocument::new("other", 0.1).fingerprint());
}

#[test]
fn source_refs_are_numbered_from_one() {
    let docs = vec![
        RetrievedDocument::new("a", 0.9).with_metadata("source", "a.md"),
        RetrievedDocument::new("b", 0.8).with_metadata("source", "b.md"),
    ];
    let refs = SourceRef::from_documents(&docs);
    assert_eq!(refs[0].label, "Source 1");
    assert_eq!(refs[1].label, "Source 2");
    assert_eq!(refs[1].source, "b.md");
}

#[test]
fn render_with_sources_appends_section() {
    let refs = vec![SourceRef {
        label: "Source 1".into(),
        source: "a.md".into(),
        chunk_index: Some("2".into()),
    }];
    let out = render_with_sources("Answer.", &refs);
    assert!(out.starts_with("Answer."));
    assert!(out.contains("Sources consulted"));
    assert!(out.contains("Source 1: a.md (chunk 2)"));
    assert_eq!(render_with_sources("Answer.", &[]), "Answer.");
}

#[test]
fn degraded_generation_is_non_empty_and_ungrounded() {
    let g = GenerationResult::degraded(Intent::Summary, "503");
    assert!(!g.response_text.is_empty());
    assert!(g.response_text.contains("503"));
    assert!(!g.used_retrieval);
}

// ─── Validation ───

#[test]
fn needs_regeneration_mirrors_validity() {
    let pass = ValidationResult::new(true, 0.9, vec![], None, None);
    let fail = ValidationResult::new(false, 0.3, vec!["weak".into()], None, None);
    assert!(!pass.needs_regeneration);
    assert!(fail.needs_regeneration);
}

#[test]
fn no_evidence_fails_closed_and_unavailable_fails_open() {
    let closed = ValidationResult::no_evidence();
    assert!(!closed.is_valid);
    assert!(closed.needs_regeneration);

    let open = ValidationResult::validator_unavailable("parse error");
    assert!(open.is_valid);
    assert!(!open.needs_regeneration);
    assert_eq!(open.confidence_score, 0.5);
    assert!(open.issues[0].contains("parse error"));
}

#[test]
fn weighted_score_uses_criteria_weights() {
    let scores = CriteriaScores {
        coherence: 1.0,
        alignment: 1.0,
        groundedness: 1.0,
        completeness: 1.0,
        citation: 1.0,
    };
    assert_eq!(scores.weighted(&CriteriaWeights::default()), 1.0);

    let scores = CriteriaScores {
        coherence: 0.5,
        alignment: 0.8,
        groundedness: 0.9,
        completeness: 0.6,
        citation: 0.0,
    };
    // 0.10 + 0.24 + 0.225 + 0.09 + 0.0
    assert_eq!(scores.weighted(&CriteriaWeights::default()), 0.655);
}

#[test]
fn criteria_are_clamped() {
    let scores = CriteriaScores {
        coherence: 2.0,
        alignment: -1.0,
        groundedness: f64::NAN,
        completeness: 0.5,
        citation: 1.0,
    }
    .clamped();
    assert_eq!(scores.coherence, 1.0);
    assert_eq!(scores.alignment, 0.0);
    assert_eq!(scores.groundedness, 0.0);
    assert_eq!(scores.completeness, 0.5);
}

// ─── Execution trace ───

#[test]
fn orchestrator_is_not_a_unit() {
    assert!(!Component::Orchestrator.is_unit());
    assert!(Component::Validator.is_unit());
}

#[test]
fn incomplete_statuses() {
    assert!(RunStatus::Cancelled.is_incomplete());
    assert!(RunStatus::Failed.is_incomplete());
    assert!(!RunStatus::Answered.is_incomplete());
    assert!(!RunStatus::NoEvidence.is_incomplete());
}

#[test]
fn generation_validation_pairs_are_counted_in_order() {
    let trace = trace_with(vec![
        step(1, Component::Classifier, StepAction::Classify),
        step(2, Component::Retriever, StepAction::Retrieve),
        step(3, Component::Generator, StepAction::Generate),
        step(4, Component::Validator, StepAction::Validate),
        step(5, Component::Orchestrator, StepAction::Regenerate),
        step(6, Component::Generator, StepAction::Generate),
        step(7, Component::Validator, StepAction::Validate),
    ]);
    assert_eq!(trace.generation_validation_pairs(), 2);
    assert_eq!(trace.count_action(StepAction::Regenerate), 1);
    assert_eq!(trace.steps_by(Component::Generator).count(), 2);
    assert!(!trace.invoked(Component::Orchestrator));
    assert_eq!(trace.agents_called.len(), 4);
}

#[test]
fn trace_serializes_with_snake_case_labels() {
    let trace = trace_with(vec![step(1, Component::Orchestrator, StepAction::ShortCircuit)]);
    let json = trace.to_json_pretty().unwrap();
    assert!(json.contains("\"short_circuit\""));
    assert!(json.contains("\"orchestrator\""));
    assert!(json.contains("\"answered\""));

    let back: ExecutionTrace = serde_json::from_str(&json).unwrap();
    assert_eq!(back, trace);
}

#[test]
fn render_summary_lists_steps() {
    let trace = trace_with(vec![
        step(1, Component::Classifier, StepAction::Classify),
        step(2, Component::Generator, StepAction::Generate),
    ]);
    let text = trace.render_summary();
    assert!(text.contains("Run ID: run-1"));
    assert!(text.contains("1. [classifier] classify"));
    assert!(text.contains("2. [generator] generate"));
    assert!(text.contains("Model calls: 2"));
}
