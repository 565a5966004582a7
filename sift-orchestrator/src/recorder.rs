//! Step-by-step construction of an execution trace.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde_json::Value;
use sift_core::models::{Component, RunStatus, StepAction, TraceStep, TraceSummary};
use sift_core::ExecutionTrace;

/// Builds the trace of one run. Owned by the orchestrator for the run's
/// lifetime; [`TraceRecorder::finish`] consumes it, so a trace is finalized
/// exactly once.
#[derive(Debug)]
pub struct TraceRecorder {
    run_id: String,
    query: String,
    started_at: DateTime<Utc>,
    steps: Vec<TraceStep>,
    regeneration_count: u32,
    agents_called: BTreeSet<Component>,
}

impl TraceRecorder {
    pub fn new(run_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            query: query.into(),
            started_at: Utc::now(),
            steps: Vec::new(),
            regeneration_count: 0,
            agents_called: BTreeSet::new(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Note that a unit is about to be called. Recorded before the call so a
    /// unit that panics still appears in `agents_called`.
    pub fn invoked(&mut self, component: Component) {
        if component.is_unit() {
            self.agents_called.insert(component);
        }
    }

    /// Append a step and return its 1-based index.
    pub fn record(&mut self, component: Component, action: StepAction, payload: Value) -> usize {
        let index = self.steps.len() + 1;
        self.steps.push(TraceStep {
            index,
            component,
            action,
            payload_summary: payload,
            timestamp: Utc::now(),
        });
        index
    }

    pub fn count_regeneration(&mut self) {
        self.regeneration_count += 1;
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Close the trace and compute its summary.
    pub fn finish(self, status: RunStatus, final_response: impl Into<String>) -> ExecutionTrace {
        let finished_at = Utc::now();
        let model_calls = self.steps.iter().map(TraceStep::model_calls).sum();
        let documents_retrieved = self
            .steps
            .iter()
            .filter(|s| s.action == StepAction::Retrieve)
            .filter_map(|s| s.payload_summary.get("documents").and_then(Value::as_u64))
            .sum::<u64>() as usize;

        let summary = TraceSummary {
            duration_ms: (finished_at - self.started_at).num_milliseconds(),
            step_count: self.steps.len(),
            model_calls,
            documents_retrieved,
            regeneration_count: self.regeneration_count,
        };

        ExecutionTrace {
            run_id: self.run_id,
            query: self.query,
            status,
            incomplete: status.is_incomplete(),
            started_at: self.started_at,
            finished_at,
            steps: self.steps,
            regeneration_count: self.regeneration_count,
            agents_called: self.agents_called,
            final_response: final_response.into(),
            summary,
        }
    }
}
