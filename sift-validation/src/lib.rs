//! # sift-validation
//!
//! The validator unit. Scores a generated response against the documents it
//! was built from on five weighted criteria and decides whether the
//! orchestrator should regenerate it.
//!
//! Two failure modes are deliberately asymmetric: a response with no
//! documents behind it is always invalid, while a validator that cannot
//! reach its model accepts the response so the regeneration loop ends.

pub mod report;
pub mod validator;
mod prompt;

pub use report::{parse_report, CriteriaReport};
pub use validator::Validator;
