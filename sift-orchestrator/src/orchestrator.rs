//! The orchestrator: runs the state machine for one query at a time.
//!
//! ```text
//! Start → Classified ─┬─ (no retrieval) → generate → Done
//!                     └─ Retrieved ─┬─ (no documents) → Done
//!                                   └─ Generated → Validated ─┬─ Done
//!                                          ▲                  │
//!                                          └── Regenerating ◄─┘ (invalid, attempts left)
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::json;
use sift_core::config::PipelineConfig;
use sift_core::constants::{CANCELLED_RESPONSE, ERROR_RESPONSE_PREFIX, NO_EVIDENCE_RESPONSE};
use sift_core::errors::PipelineError;
use sift_core::models::{Component, RunStatus, StepAction};
use sift_core::traits::{IClassifier, IGenerator, IRetriever, ITraceSink, IValidator};
use sift_core::{CancellationToken, ExecutionTrace, Intent, SiftResult};
use sift_observability::tracing_setup::events;
use sift_observability::TraceStore;
use tracing::{debug, info, warn};

use crate::recorder::TraceRecorder;
use crate::result::QueryResult;
use crate::state::{RunState, Stage};

/// Runs queries through classification, retrieval, generation and
/// validation. Shareable across threads; each run owns its own state.
pub struct Orchestrator {
    classifier: Arc<dyn IClassifier>,
    retriever: Arc<dyn IRetriever>,
    generator: Arc<dyn IGenerator>,
    validator: Arc<dyn IValidator>,
    config: PipelineConfig,
    trace_store: Option<TraceStore>,
    trace_sink: Option<Box<dyn ITraceSink>>,
}

impl Orchestrator {
    pub fn new(
        classifier: Arc<dyn IClassifier>,
        retriever: Arc<dyn IRetriever>,
        generator: Arc<dyn IGenerator>,
        validator: Arc<dyn IValidator>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            classifier,
            retriever,
            generator,
            validator,
            config,
            trace_store: None,
            trace_sink: None,
        }
    }

    /// Keep every finished trace in `store`.
    pub fn with_trace_store(mut self, store: TraceStore) -> Self {
        self.trace_store = Some(store);
        self
    }

    /// Persist every finished trace through `sink`.
    pub fn with_trace_sink(mut self, sink: Box<dyn ITraceSink>) -> Self {
        self.trace_sink = Some(sink);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn trace_store(&self) -> Option<&TraceStore> {
        self.trace_store.as_ref()
    }

    /// Answer one query. `max_regeneration_attempts` overrides the configured
    /// attempt cap for this run.
    pub fn process_query(&self, query: &str, max_regeneration_attempts: Option<u32>) -> QueryResult {
        self.process_query_with_cancel(query, max_regeneration_attempts, &CancellationToken::new())
    }

    /// Answer one query, stopping at the next unit boundary once `cancel` fires.
    pub fn process_query_with_cancel(
        &self,
        query: &str,
        max_regeneration_attempts: Option<u32>,
        cancel: &CancellationToken,
    ) -> QueryResult {
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = sift_observability::pipeline_span!(run_id.as_str());
        let _guard = span.enter();

        let max_attempts = max_regeneration_attempts
            .unwrap_or(self.config.max_regeneration_attempts)
            .max(1);
        info!(query_len = query.len(), max_attempts, "processing query");

        let mut recorder = TraceRecorder::new(run_id, query);
        let mut run = RunState::new();

        let driven = panic::catch_unwind(AssertUnwindSafe(|| {
            self.drive(query, &mut run, &mut recorder, cancel, max_attempts)
        }));
        let outcome = match driven {
            Ok(result) => result,
            Err(payload) => Err(PipelineError::UnitPanicked {
                component: run
                    .active
                    .unwrap_or(Component::Orchestrator)
                    .as_str()
                    .to_string(),
                message: panic_message(payload.as_ref()),
            }),
        };

        let result = self.conclude(run, recorder, outcome);
        self.publish(&result.trace);
        result
    }

    /// Answer several queries in order.
    pub fn process_batch(&self, queries: &[String]) -> Vec<QueryResult> {
        queries
            .iter()
            .map(|query| self.process_query(query, None))
            .collect()
    }

    /// Persist the traces of `results` as one document through the sink.
    /// Returns where they went, or `None` without a sink or on failure.
    pub fn export_batch(&self, results: &[QueryResult], name: &str) -> Option<String> {
        let sink = self.trace_sink.as_ref()?;
        let traces: Vec<ExecutionTrace> = results.iter().map(|r| r.trace.clone()).collect();
        let location = persist(name, || sink.export_batch(&traces, name))?;
        info!(traces = traces.len(), location = %location, "batch exported");
        Some(location)
    }

    fn drive(
        &self,
        query: &str,
        run: &mut RunState,
        recorder: &mut TraceRecorder,
        cancel: &CancellationToken,
        max_attempts: u32,
    ) -> Result<(), PipelineError> {
        loop {
            run.stage = match run.stage {
                Stage::Start => {
                    checkpoint(cancel, "classification")?;
                    self.classify(query, run, recorder);
                    Stage::Classified
                }
                Stage::Classified => {
                    let (intent, requires_retrieval) = run
                        .classification
                        .as_ref()
                        .map(|c| (c.intent, c.requires_retrieval))
                        .ok_or_else(|| PipelineError::InvariantViolated {
                            details: "classified stage without a classification".to_string(),
                        })?;

                    if !requires_retrieval {
                        checkpoint(cancel, "generation")?;
                        self.generate(query, intent, run, recorder);
                        run.finish(RunStatus::Answered)
                    } else {
                        checkpoint(cancel, "retrieval")?;
                        self.retrieve(query, intent, run, recorder);
                        if run.documents.is_empty() {
                            events::evidence_missing(recorder.run_id(), intent.as_str());
                            recorder.record(
                                Component::Orchestrator,
                                StepAction::ShortCircuit,
                                json!({ "reason": "no_documents" }),
                            );
                            run.finish(RunStatus::NoEvidence)
                        } else {
                            Stage::Retrieved
                        }
                    }
                }
                Stage::Retrieved | Stage::Regenerating => {
                    checkpoint(cancel, "generation")?;
                    let intent = run.classification.as_ref().map_or(Intent::Search, |c| c.intent);
                    self.generate(query, intent, run, recorder);
                    Stage::Generated
                }
                Stage::Generated => {
                    checkpoint(cancel, "validation")?;
                    self.validate(query, run, recorder);
                    Stage::Validated
                }
                Stage::Validated => {
                    let rejected = run.validation.as_ref().is_some_and(|v| v.needs_regeneration);
                    if rejected && run.attempts < max_attempts {
                        let issues = run
                            .validation
                            .as_ref()
                            .map(|v| v.issues.clone())
                            .unwrap_or_default();
                        events::regeneration_triggered(recorder.run_id(), run.attempts + 1, &issues);
                        recorder.count_regeneration();
                        recorder.record(
                            Component::Orchestrator,
                            StepAction::Regenerate,
                            json!({ "next_attempt": run.attempts + 1, "issues": issues }),
                        );
                        Stage::Regenerating
                    } else {
                        if rejected {
                            warn!(
                                attempts = run.attempts,
                                "attempt cap reached, returning last response"
                            );
                            recorder.record(
                                Component::Orchestrator,
                                StepAction::Exhausted,
                                json!({ "reason": "attempts_exhausted", "attempts": run.attempts }),
                            );
                        }
                        run.finish(RunStatus::Answered)
                    }
                }
                Stage::Done => return Ok(()),
            };
        }
    }

    fn classify(&self, query: &str, run: &mut RunState, recorder: &mut TraceRecorder) {
        run.active = Some(Component::Classifier);
        recorder.invoked(Component::Classifier);
        let classification = self.classifier.classify(query);
        run.active = None;

        debug!(intent = %classification.intent, confidence = classification.confidence, "classified");
        recorder.record(
            Component::Classifier,
            StepAction::Classify,
            json!({
                "intent": classification.intent.as_str(),
                "confidence": classification.confidence,
                "requires_retrieval": classification.requires_retrieval,
                "rationale": classification.rationale,
                "model_calls": u64::from(self.classifier.uses_model()),
            }),
        );
        run.classification = Some(classification);
    }

    fn retrieve(&self, query: &str, intent: Intent, run: &mut RunState, recorder: &mut TraceRecorder) {
        run.active = Some(Component::Retriever);
        recorder.invoked(Component::Retriever);
        let outcome = self.retriever.retrieve_detailed(query, intent);
        run.active = None;

        let fingerprints: Vec<String> = outcome.documents.iter().map(|d| d.fingerprint()).collect();
        let top_score = outcome.documents.first().map(|d| d.relevance_score);
        recorder.record(
            Component::Retriever,
            StepAction::Retrieve,
            json!({
                "intent": intent.as_str(),
                "strategy": outcome.strategy,
                "documents": outcome.documents.len(),
                "fingerprints": fingerprints,
                "top_score": top_score,
                "rewritten_query": outcome.rewritten_query,
                "model_calls": outcome.model_calls,
            }),
        );
        run.documents = outcome.documents;
    }

    fn generate(&self, query: &str, intent: Intent, run: &mut RunState, recorder: &mut TraceRecorder) {
        run.active = Some(Component::Generator);
        recorder.invoked(Component::Generator);
        let generation = self.generator.generate(query, intent, &run.documents);
        run.active = None;
        run.attempts += 1;

        recorder.record(
            Component::Generator,
            StepAction::Generate,
            json!({
                "attempt": run.attempts,
                "used_retrieval": generation.used_retrieval,
                "document_count": generation.document_count,
                "response_chars": generation.response_text.chars().count(),
                "model_calls": u64::from(self.generator.uses_model()),
            }),
        );
        run.generation = Some(generation);
    }

    fn validate(&self, query: &str, run: &mut RunState, recorder: &mut TraceRecorder) {
        let response = run
            .generation
            .as_ref()
            .map(|g| g.response_text.as_str())
            .unwrap_or_default();

        run.active = Some(Component::Validator);
        recorder.invoked(Component::Validator);
        let validation = self.validator.validate(query, response, &run.documents);
        run.active = None;

        let model_calls = self.validator.uses_model() && !run.documents.is_empty();
        recorder.record(
            Component::Validator,
            StepAction::Validate,
            json!({
                "attempt": run.attempts,
                "is_valid": validation.is_valid,
                "confidence_score": validation.confidence_score,
                "needs_regeneration": validation.needs_regeneration,
                "issues": validation.issues,
                "model_calls": u64::from(model_calls),
            }),
        );
        run.validation = Some(validation);
    }

    /// Turn the run's final state into a result, recording the terminal step
    /// for runs that ended early.
    fn conclude(
        &self,
        run: RunState,
        mut recorder: TraceRecorder,
        outcome: Result<(), PipelineError>,
    ) -> QueryResult {
        let intent = run
            .classification
            .as_ref()
            .map_or(Intent::General, |c| c.intent);

        let (status, response) = match outcome {
            Ok(()) => match run.outcome {
                Some(RunStatus::NoEvidence) => (RunStatus::NoEvidence, NO_EVIDENCE_RESPONSE.to_string()),
                _ => (
                    RunStatus::Answered,
                    run.generation
                        .as_ref()
                        .map(|g| g.response_text.clone())
                        .unwrap_or_default(),
                ),
            },
            Err(PipelineError::Cancelled { stage }) => {
                info!(stage = %stage, "run cancelled");
                recorder.record(
                    Component::Orchestrator,
                    StepAction::Cancel,
                    json!({ "stage": stage }),
                );
                (RunStatus::Cancelled, CANCELLED_RESPONSE.to_string())
            }
            Err(e) => {
                let error = e.to_string();
                tracing::error!(error = %error, "run failed");
                recorder.record(
                    Component::Orchestrator,
                    StepAction::Fail,
                    json!({ "error": error }),
                );
                (RunStatus::Failed, format!("{ERROR_RESPONSE_PREFIX}: {error}"))
            }
        };

        let answered = status == RunStatus::Answered;
        let (documents_used, sources) = match (&run.generation, answered) {
            (Some(g), true) => (g.document_count, g.sources.clone()),
            _ => (0, Vec::new()),
        };
        let validation = if answered { run.validation } else { None };

        let trace = recorder.finish(status, response.clone());
        events::run_completed(
            &trace.run_id,
            status.as_str(),
            trace.steps.len(),
            trace.summary.duration_ms,
        );

        QueryResult {
            run_id: trace.run_id.clone(),
            status,
            response,
            intent,
            classification: run.classification,
            documents_used,
            sources,
            validation,
            attempts: run.attempts,
            trace,
        }
    }

    fn publish(&self, trace: &ExecutionTrace) {
        if let Some(store) = &self.trace_store {
            store.insert(trace.clone());
        }
        if let Some(sink) = &self.trace_sink {
            if let Some(location) = persist(&trace.run_id, || sink.save(trace)) {
                debug!(location = %location, "trace saved");
            }
        }
    }
}

/// Run one sink call, turning an error or a panic into a logged `None`.
fn persist(label: &str, save: impl FnOnce() -> SiftResult<String>) -> Option<String> {
    let failure = match panic::catch_unwind(AssertUnwindSafe(save)) {
        Ok(Ok(location)) => return Some(location),
        Ok(Err(e)) => e.to_string(),
        Err(payload) => format!("trace sink panicked: {}", panic_message(payload.as_ref())),
    };
    events::trace_persist_failed(label, &failure);
    None
}

fn checkpoint(cancel: &CancellationToken, stage: &str) -> Result<(), PipelineError> {
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled {
            stage: stage.to_string(),
        });
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
