//! Execution trace: the audit record of one query's trip through the pipeline.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SiftResult;

/// Who performed a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Classifier,
    Retriever,
    Generator,
    Validator,
    /// Routing decisions taken by the orchestrator itself.
    Orchestrator,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classifier => "classifier",
            Self::Retriever => "retriever",
            Self::Generator => "generator",
            Self::Validator => "validator",
            Self::Orchestrator => "orchestrator",
        }
    }

    /// Whether this is one of the four decision units (not the orchestrator).
    pub fn is_unit(&self) -> bool {
        !matches!(self, Self::Orchestrator)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Classify,
    Retrieve,
    Generate,
    Validate,
    /// Validation failed with attempts left; looping back to generation.
    Regenerate,
    /// Retrieval came back empty; answered with the fixed no-evidence message.
    ShortCircuit,
    /// Validation still failed at the attempt cap; the last answer stands.
    Exhausted,
    Cancel,
    Fail,
}

impl StepAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::Retrieve => "retrieve",
            Self::Generate => "generate",
            Self::Validate => "validate",
            Self::Regenerate => "regenerate",
            Self::ShortCircuit => "short_circuit",
            Self::Exhausted => "exhausted",
            Self::Cancel => "cancel",
            Self::Fail => "fail",
        }
    }
}

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// An answer was produced (validated or best effort on exhaustion).
    Answered,
    /// Retrieval found nothing; the fixed no-evidence message was returned.
    NoEvidence,
    /// The caller cancelled the run.
    Cancelled,
    /// The top-level error handler caught a failure.
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Answered => "answered",
            Self::NoEvidence => "no_evidence",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    /// Runs that stopped before reaching a designed terminal state.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// 1-based position in the trace.
    pub index: usize,
    pub component: Component,
    pub action: StepAction,
    /// Small JSON object describing the step's inputs and outputs.
    pub payload_summary: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl TraceStep {
    /// Backend calls made during this step, as recorded in its payload.
    pub fn model_calls(&self) -> u64 {
        self.payload_summary
            .get("model_calls")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0)
    }
}

/// Figures derived once when the trace is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub duration_ms: i64,
    pub step_count: usize,
    pub model_calls: u64,
    pub documents_retrieved: usize,
    pub regeneration_count: u32,
}

/// The complete, finalized record of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionTrace {
    pub run_id: String,
    pub query: String,
    pub status: RunStatus,
    /// Set when the run stopped early (cancellation or failure).
    pub incomplete: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<TraceStep>,
    pub regeneration_count: u32,
    /// Units invoked during the run.
    pub agents_called: BTreeSet<Component>,
    pub final_response: String,
    pub summary: TraceSummary,
}

impl ExecutionTrace {
    /// Steps taken by one component, in order.
    pub fn steps_by(&self, component: Component) -> impl Iterator<Item = &TraceStep> {
        self.steps.iter().filter(move |s| s.component == component)
    }

    pub fn count_action(&self, action: StepAction) -> usize {
        self.steps.iter().filter(|s| s.action == action).count()
    }

    /// Number of generation attempts that were followed by a validation.
    pub fn generation_validation_pairs(&self) -> usize {
        self.steps
            .windows(2)
            .filter(|w| w[0].action == StepAction::Generate && w[1].action == StepAction::Validate)
            .count()
    }

    pub fn invoked(&self, component: Component) -> bool {
        self.agents_called.contains(&component)
    }

    /// Human-readable summary for logs and terminals.
    pub fn render_summary(&self) -> String {
        let agents: Vec<&str> = self.agents_called.iter().map(Component::as_str).collect();
        let mut lines = vec![
            "=== Execution summary ===".to_string(),
            format!("Run ID: {}", self.run_id),
            format!("Query: {}", self.query),
            format!("Status: {}", self.status),
            format!("Total time: {:.2}s", self.summary.duration_ms as f64 / 1000.0),
            format!("Agents involved: {}", agents.join(", ")),
            format!("Model calls: {}", self.summary.model_calls),
            format!("Documents retrieved: {}", self.summary.documents_retrieved),
            format!("Regenerations: {}", self.regeneration_count),
            String::new(),
            "=== Steps ===".to_string(),
        ];
        for step in &self.steps {
            lines.push(format!(
                "{}. [{}] {}",
                step.index,
                step.component,
                step.action.as_str()
            ));
        }
        lines.join("\n")
    }

    pub fn to_json_pretty(&self) -> SiftResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
