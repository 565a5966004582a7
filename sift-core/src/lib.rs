//! # sift-core
//!
//! Foundation crate for the sift query pipeline.
//! Defines the shared types, unit traits, errors, config, and the execution
//! trace model. Every other crate in the workspace depends on this.

pub mod cancel;
pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancel::CancellationToken;
pub use config::SiftConfig;
pub use errors::{SiftError, SiftResult};
pub use intent::Intent;
pub use models::{
    Classification, ExecutionTrace, GenerationResult, Prompt, RetrievedDocument, ValidationResult,
};
