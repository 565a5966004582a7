//! # sift-llm
//!
//! Language-model backends behind [`ILanguageModel`]:
//! an OpenAI-compatible HTTP chat backend, a fixed-interval throttle
//! decorator, and helpers for pulling JSON out of model replies.

pub mod chat_backend;
pub mod json_extract;
pub mod throttle;

use std::sync::Arc;

use sift_core::config::{BackendRole, LlmConfig};
use sift_core::traits::ILanguageModel;
use sift_core::SiftResult;

pub use chat_backend::HttpChatModel;
pub use json_extract::{extract_json_object, parse_json_object, strip_code_fences};
pub use throttle::Throttled;

/// Build the throttled backend for a role from configuration.
///
/// Fails if the role's API key environment variable is not set.
pub fn backend_for_role(config: &LlmConfig, role: BackendRole) -> SiftResult<Arc<dyn ILanguageModel>> {
    let model = HttpChatModel::from_profile(config.profile(role))?;
    Ok(Arc::new(Throttled::from_millis(
        Arc::new(model),
        config.call_delay_ms,
    )))
}
