//! # sift-generation
//!
//! The generator unit: writes the answer from the retrieved documents,
//! citing them as `[Source N]`, or converses directly when the query needs
//! no documents.

pub mod context;
pub mod generator;
mod prompts;

pub use context::format_context;
pub use generator::Generator;
