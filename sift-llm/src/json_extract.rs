//! Pulling a JSON object out of free-form model output.
//!
//! Models wrap JSON in markdown fences or surround it with prose; these
//! helpers find the object and parse it.

use sift_core::errors::LlmError;
use sift_core::SiftResult;

/// Remove a surrounding markdown code fence (```` ```json ... ``` ````), if any.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// The outermost `{...}` span in `text`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let body = strip_code_fences(text);
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    (end > start).then(|| &body[start..=end])
}

/// Parse the outermost JSON object in a model reply.
pub fn parse_json_object(text: &str) -> SiftResult<serde_json::Map<String, serde_json::Value>> {
    let raw = extract_json_object(text).ok_or_else(|| LlmError::MalformedOutput {
        reason: "no JSON object in model output".to_string(),
    })?;
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(LlmError::MalformedOutput {
            reason: "model output is not a JSON object".to_string(),
        }
        .into()),
        Err(e) => Err(LlmError::MalformedOutput {
            reason: format!("invalid JSON in model output: {e}"),
        }
        .into()),
    }
}
