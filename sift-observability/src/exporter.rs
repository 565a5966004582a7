//! JSON persistence of execution traces.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use sift_core::errors::TraceError;
use sift_core::models::{Component, StepAction};
use sift_core::traits::ITraceSink;
use sift_core::{ExecutionTrace, SiftResult};
use tracing::info;

/// Writes traces as pretty-printed JSON files under one directory.
#[derive(Debug, Clone)]
pub struct JsonTraceExporter {
    dir: PathBuf,
}

#[derive(Serialize)]
struct BatchDocument<'a> {
    batch_name: &'a str,
    exported_at: String,
    total_traces: usize,
    summary: BatchSummary,
    traces: &'a [ExecutionTrace],
}

#[derive(Serialize)]
struct BatchSummary {
    total_documents_retrieved: usize,
    average_duration_ms: f64,
    statuses: BTreeMap<String, usize>,
    intents: BTreeMap<String, usize>,
    strategies: BTreeMap<String, usize>,
}

impl JsonTraceExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, file_name: &str, contents: &str) -> SiftResult<String> {
        std::fs::create_dir_all(&self.dir).map_err(|e| TraceError::WriteFailed {
            path: self.dir.display().to_string(),
            reason: e.to_string(),
        })?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, contents).map_err(|e| TraceError::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(path.display().to_string())
    }

    fn encode<T: Serialize>(value: &T, run_id: &str) -> SiftResult<String> {
        serde_json::to_string_pretty(value).map_err(|e| {
            TraceError::EncodeFailed {
                run_id: run_id.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Label recorded under `key` in the first step of `action`.
fn step_label(trace: &ExecutionTrace, component: Component, action: StepAction, key: &str) -> Option<String> {
    trace
        .steps_by(component)
        .find(|s| s.action == action)
        .and_then(|s| s.payload_summary.get(key))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// `label` reduced to characters safe inside a single file name, so a
/// caller-chosen name can never leave the export directory.
fn file_stem(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.trim_matches('_').is_empty() {
        "batch".to_string()
    } else {
        stem
    }
}

fn summarize(traces: &[ExecutionTrace]) -> BatchSummary {
    let mut statuses = BTreeMap::new();
    let mut intents = BTreeMap::new();
    let mut strategies = BTreeMap::new();
    for trace in traces {
        *statuses.entry(trace.status.as_str().to_string()).or_insert(0) += 1;
        let intent = step_label(trace, Component::Classifier, StepAction::Classify, "intent")
            .unwrap_or_else(|| "unknown".to_string());
        *intents.entry(intent).or_insert(0) += 1;
        if let Some(strategy) =
            step_label(trace, Component::Retriever, StepAction::Retrieve, "strategy")
        {
            *strategies.entry(strategy).or_insert(0) += 1;
        }
    }

    let average_duration_ms = if traces.is_empty() {
        0.0
    } else {
        traces.iter().map(|t| t.summary.duration_ms).sum::<i64>() as f64 / traces.len() as f64
    };

    BatchSummary {
        total_documents_retrieved: traces.iter().map(|t| t.summary.documents_retrieved).sum(),
        average_duration_ms,
        statuses,
        intents,
        strategies,
    }
}

impl ITraceSink for JsonTraceExporter {
    fn save(&self, trace: &ExecutionTrace) -> SiftResult<String> {
        let stamp = trace.finished_at.format("%Y%m%d_%H%M%S");
        let file_name = format!("trace_{}_{stamp}.json", file_stem(&trace.run_id));
        let path = self.write(&file_name, &Self::encode(trace, &trace.run_id)?)?;
        info!(run_id = %trace.run_id, path = %path, "trace saved");
        Ok(path)
    }

    fn export_batch(&self, traces: &[ExecutionTrace], name: &str) -> SiftResult<String> {
        let now = Utc::now();
        let document = BatchDocument {
            batch_name: name,
            exported_at: now.to_rfc3339(),
            total_traces: traces.len(),
            summary: summarize(traces),
            traces,
        };
        let file_name = format!("{}_{}.json", file_stem(name), now.format("%Y%m%d_%H%M%S"));
        let path = self.write(&file_name, &Self::encode(&document, name)?)?;
        info!(batch = %name, traces = traces.len(), path = %path, "trace batch exported");
        Ok(path)
    }
}
