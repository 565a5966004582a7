//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a unit falling back after an internal failure.
pub fn unit_degraded(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "unit_degraded",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "unit degraded"
    );
}

/// Log a failed validation that sends the run back to generation.
pub fn regeneration_triggered(run_id: &str, attempt: u32, issues: &[String]) {
    tracing::info!(
        event = "regeneration_triggered",
        run_id = %run_id,
        attempt = attempt,
        issues = ?issues,
        "regeneration triggered"
    );
}

/// Log the empty-evidence short-circuit.
pub fn evidence_missing(run_id: &str, intent: &str) {
    tracing::info!(
        event = "evidence_missing",
        run_id = %run_id,
        intent = %intent,
        "no relevant documents, short-circuiting"
    );
}

/// Log a trace that could not be persisted.
pub fn trace_persist_failed(run_id: &str, error: &str) {
    tracing::warn!(
        event = "trace_persist_failed",
        run_id = %run_id,
        error = %error,
        "trace persistence failed"
    );
}

/// Log the end of a run.
pub fn run_completed(run_id: &str, status: &str, steps: usize, latency_ms: i64) {
    tracing::info!(
        event = "run_completed",
        run_id = %run_id,
        status = %status,
        steps = steps,
        latency_ms = latency_ms,
        "run completed"
    );
}
