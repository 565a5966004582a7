//! # sift-orchestrator
//!
//! Drives one query through the pipeline:
//! classify → (general? converse : retrieve → generate → validate → regenerate?)
//! and records every step in an [`ExecutionTrace`](sift_core::ExecutionTrace).
//!
//! Unit failures are absorbed by the units themselves. The orchestrator only
//! ends a run early on cancellation or a panicking unit, and even then the
//! caller gets a complete [`QueryResult`] with a partial trace.

pub mod builder;
pub mod orchestrator;
pub mod recorder;
pub mod result;
mod state;

pub use builder::PipelineBuilder;
pub use orchestrator::Orchestrator;
pub use recorder::TraceRecorder;
pub use result::QueryResult;
