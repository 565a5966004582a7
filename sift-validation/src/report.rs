//! Parsing the validator model's reply and turning it into a verdict.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use sift_core::config::ValidationConfig;
use sift_core::errors::LlmError;
use sift_core::models::CriteriaScores;
use sift_core::{SiftResult, ValidationResult};
use sift_llm::parse_json_object;

static CITATION_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[Source \d+").ok());

/// What the validator model reported about one response.
#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaReport {
    pub scores: CriteriaScores,
    pub needs_regeneration: bool,
    pub issues: Vec<String>,
    pub assessment: Option<String>,
}

/// Parse a validator reply. Every criterion score must be present.
pub fn parse_report(reply: &str) -> SiftResult<CriteriaReport> {
    let map = parse_json_object(reply)?;

    let scores = CriteriaScores {
        coherence: criterion(&map, &["coherence", "coherence_score"])?,
        alignment: criterion(&map, &["alignment", "alignment_score"])?,
        groundedness: criterion(
            &map,
            &["groundedness", "groundedness_score", "hallucination_score"],
        )?,
        completeness: criterion(&map, &["completeness", "completeness_score"])?,
        citation: criterion(&map, &["citation", "citation_score"])?,
    }
    .clamped();

    let needs_regeneration = map
        .get("needs_regeneration")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let issues = ["issues", "specific_issues"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_array))
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let assessment = ["assessment", "overall_assessment"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::to_string);

    Ok(CriteriaReport {
        scores,
        needs_regeneration,
        issues,
        assessment,
    })
}

fn criterion(map: &Map<String, Value>, keys: &[&str]) -> SiftResult<f64> {
    let value = keys.iter().find_map(|key| map.get(*key)).ok_or_else(|| {
        LlmError::MalformedOutput {
            reason: format!("validator reply has no {} score", keys[0]),
        }
    })?;
    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    score.ok_or_else(|| {
        LlmError::MalformedOutput {
            reason: format!("validator {} score is not a number", keys[0]),
        }
        .into()
    })
}

/// Whether the response cites at least one `[Source N]`.
pub fn has_citation(response: &str) -> bool {
    CITATION_MARKER
        .as_ref()
        .is_some_and(|re| re.is_match(response))
}

/// Apply the thresholds in `config` to a parsed report.
///
/// Threshold violations are appended to the model's own issues so the
/// orchestrator can log why a response was rejected.
pub fn decide(
    report: CriteriaReport,
    response: &str,
    has_documents: bool,
    config: &ValidationConfig,
) -> ValidationResult {
    let overall = report.scores.weighted(&config.weights);
    let mut issues = report.issues;

    if overall < config.pass_threshold {
        issues.push(format!(
            "overall score {overall:.3} below threshold {:.2}",
            config.pass_threshold
        ));
    }
    if report.scores.alignment < config.min_alignment {
        issues.push(format!(
            "source alignment {:.2} below {:.2}",
            report.scores.alignment, config.min_alignment
        ));
    }
    if report.scores.groundedness < config.min_groundedness {
        issues.push(format!(
            "possible fabrication: groundedness {:.2} below {:.2}",
            report.scores.groundedness, config.min_groundedness
        ));
    }
    let citation_missing = config.require_citations && has_documents && !has_citation(response);
    if citation_missing {
        issues.push("response cites none of the supplied documents".to_string());
    }

    let is_valid = overall >= config.pass_threshold
        && report.scores.alignment >= config.min_alignment
        && report.scores.groundedness >= config.min_groundedness
        && !report.needs_regeneration
        && !citation_missing;

    ValidationResult::new(
        is_valid,
        overall,
        issues,
        Some(report.scores),
        report.assessment,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(alignment: f64, groundedness: f64) -> CriteriaReport {
        CriteriaReport {
            scores: CriteriaScores {
                coherence: 0.9,
                alignment,
                groundedness,
                completeness: 0.9,
                citation: 0.9,
            },
            needs_regeneration: false,
            issues: Vec::new(),
            assessment: None,
        }
    }

    #[test]
    fn citation_marker_matches_lists() {
        assert!(has_citation("see [Source 2]"));
        assert!(has_citation("see [Source 1, 3]"));
        assert!(!has_citation("see Source 1"));
    }

    #[test]
    fn low_alignment_fails_even_with_high_overall() {
        let v = decide(report(0.59, 1.0), "x [Source 1]", true, &ValidationConfig::default());
        assert!(!v.is_valid);
        assert!(v.needs_regeneration);
        assert!(v.issues.iter().any(|i| i.contains("alignment")));
    }

    #[test]
    fn citations_not_required_without_documents() {
        let v = decide(report(0.9, 0.9), "no markers", false, &ValidationConfig::default());
        assert!(v.is_valid);
    }

    #[test]
    fn legacy_hallucination_key_is_accepted() {
        let r = parse_report(
            r#"{"coherence_score": 1, "alignment_score": 1, "hallucination_score": 0.2,
                "completeness_score": 1, "citation_score": 1}"#,
        )
        .unwrap();
        assert_eq!(r.scores.groundedness, 0.2);
        assert!(!r.needs_regeneration);
    }

    #[test]
    fn missing_criterion_is_an_error() {
        assert!(parse_report(r#"{"coherence": 1, "alignment": 1}"#).is_err());
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let r = parse_report(
            r#"{"coherence": 1.4, "alignment": -1, "groundedness": "0.8",
                "completeness": 1, "citation": 1}"#,
        )
        .unwrap();
        assert_eq!(r.scores.coherence, 1.0);
        assert_eq!(r.scores.alignment, 0.0);
        assert_eq!(r.scores.groundedness, 0.8);
    }
}
