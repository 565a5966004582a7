//! # sift-observability
//!
//! Structured logging setup, span macros, and event helpers, plus the
//! in-memory [`TraceStore`] and the [`JsonTraceExporter`] that persists
//! finished execution traces.

pub mod exporter;
pub mod trace_store;
pub mod tracing_setup;

pub use exporter::JsonTraceExporter;
pub use trace_store::{TraceStats, TraceStore};
