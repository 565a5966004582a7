//! Turning a model reply into a [`Classification`].

use serde_json::{Map, Value};
use sift_core::errors::LlmError;
use sift_core::{Classification, Intent, SiftResult};
use sift_llm::parse_json_object;

/// Confidence assumed when the reply omits one.
const MISSING_CONFIDENCE: f64 = 0.5;

/// Parse a classifier reply.
///
/// Unknown intent labels are coerced to `general`; a reply with no JSON
/// object or no `intent` field is an error.
pub fn parse_classification(reply: &str) -> SiftResult<Classification> {
    let map = parse_json_object(reply)?;

    let label = map
        .get("intent")
        .and_then(Value::as_str)
        .ok_or_else(|| LlmError::MalformedOutput {
            reason: "classifier reply has no intent".to_string(),
        })?;
    let confidence = number(map.get("confidence")).unwrap_or(MISSING_CONFIDENCE);

    let Some(intent) = Intent::from_label(label) else {
        return Ok(Classification::unrecognized(label, confidence));
    };

    let requires_retrieval =
        requires_retrieval(&map).unwrap_or_else(|| intent.needs_documents());
    let rationale = ["reasoning", "rationale"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .unwrap_or_default();

    Ok(Classification::new(
        intent,
        confidence,
        requires_retrieval,
        rationale,
    ))
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn requires_retrieval(map: &Map<String, Value>) -> Option<bool> {
    let value = map.get("requires_retrieval").or_else(|| map.get("requires_rag"))?;
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "si" | "sí" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_confidence_defaults() {
        let c = parse_classification(r#"{"intent": "search"}"#).unwrap();
        assert_eq!(c.confidence, 0.5);
        assert!(c.requires_retrieval);
    }

    #[test]
    fn string_confidence_is_parsed() {
        let c = parse_classification(r#"{"intent": "summary", "confidence": "0.7"}"#).unwrap();
        assert_eq!(c.confidence, 0.7);
    }

    #[test]
    fn legacy_requires_rag_key_is_accepted() {
        let c = parse_classification(r#"{"intent": "search", "requires_rag": false}"#).unwrap();
        assert!(!c.requires_retrieval);
    }

    #[test]
    fn missing_intent_is_an_error() {
        assert!(parse_classification(r#"{"confidence": 0.9}"#).is_err());
        assert!(parse_classification("I think it is a search").is_err());
    }
}
