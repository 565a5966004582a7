//! # sift-classifier
//!
//! The classifier unit: decides a query's intent and whether it needs
//! documents. [`ModelClassifier`] asks a language model;
//! [`KeywordClassifier`] scores keyword tables offline.

pub mod keyword;
pub mod model_classifier;
pub mod parse;
mod prompt;

pub use keyword::KeywordClassifier;
pub use model_classifier::ModelClassifier;
pub use parse::parse_classification;
