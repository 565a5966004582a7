//! Concurrent in-memory store of finished execution traces.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sift_core::ExecutionTrace;

/// Aggregate figures over the stored traces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceStats {
    pub total_runs: usize,
    /// Run count per terminal status label.
    pub by_status: BTreeMap<String, usize>,
    pub avg_duration_ms: f64,
    pub p95_duration_ms: i64,
    pub avg_steps: f64,
    pub avg_model_calls: f64,
    pub total_regenerations: u64,
    /// Share of runs that regenerated at least once.
    pub regeneration_rate: f64,
}

/// Thread-safe trace store keyed by run id. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct TraceStore {
    traces: Arc<DashMap<String, ExecutionTrace>>,
}

impl TraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a trace, replacing any previous trace with the same run id.
    pub fn insert(&self, trace: ExecutionTrace) {
        self.traces.insert(trace.run_id.clone(), trace);
    }

    pub fn get(&self, run_id: &str) -> Option<ExecutionTrace> {
        self.traces.get(run_id).map(|entry| entry.value().clone())
    }

    /// All stored traces, oldest first.
    pub fn all(&self) -> Vec<ExecutionTrace> {
        let mut traces: Vec<ExecutionTrace> =
            self.traces.iter().map(|entry| entry.value().clone()).collect();
        traces.sort_by_key(|t| t.started_at);
        traces
    }

    pub fn remove(&self, run_id: &str) -> Option<ExecutionTrace> {
        self.traces.remove(run_id).map(|(_, trace)| trace)
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn clear(&self) {
        self.traces.clear();
    }

    /// Compute statistics over every stored trace.
    pub fn stats(&self) -> TraceStats {
        let traces = self.all();
        if traces.is_empty() {
            return TraceStats::default();
        }
        let n = traces.len() as f64;

        let mut by_status = BTreeMap::new();
        for trace in &traces {
            *by_status.entry(trace.status.as_str().to_string()).or_insert(0) += 1;
        }

        let mut durations: Vec<i64> = traces.iter().map(|t| t.summary.duration_ms).collect();
        durations.sort_unstable();
        let idx = ((0.95 * (durations.len() - 1) as f64).round() as usize).min(durations.len() - 1);

        let regenerated = traces.iter().filter(|t| t.regeneration_count > 0).count();

        TraceStats {
            total_runs: traces.len(),
            by_status,
            avg_duration_ms: durations.iter().sum::<i64>() as f64 / n,
            p95_duration_ms: durations[idx],
            avg_steps: traces.iter().map(|t| t.steps.len()).sum::<usize>() as f64 / n,
            avg_model_calls: traces.iter().map(|t| t.summary.model_calls).sum::<u64>() as f64 / n,
            total_regenerations: traces.iter().map(|t| u64::from(t.regeneration_count)).sum(),
            regeneration_rate: regenerated as f64 / n,
        }
    }
}
