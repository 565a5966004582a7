use sift_core::config::*;
use sift_core::intent::Intent;
use sift_core::SiftError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = SiftConfig::from_toml("").unwrap();

    // Backend defaults
    assert_eq!(config.llm.call_delay_ms, 1_500);
    assert_eq!(config.llm.reasoning.api_key_env, "GEMINI_API_KEY");
    assert_eq!(config.llm.fast.api_key_env, "GROQ_API_KEY");
    assert_eq!(config.llm.roles.classifier, BackendRole::Reasoning);
    assert_eq!(config.llm.roles.retriever, BackendRole::Fast);
    assert_eq!(config.llm.roles.generator, BackendRole::Fast);
    assert_eq!(config.llm.roles.validator, BackendRole::Reasoning);

    // Classifier defaults
    assert_eq!(config.classifier.strategy, ClassifierStrategy::Model);
    assert_eq!(config.classifier.fallback_confidence, 0.5);

    // Retrieval defaults
    assert_eq!(config.retrieval.search.k, 4);
    assert_eq!(config.retrieval.summary.k, 10);
    assert_eq!(config.retrieval.comparison.k, 6);
    assert_eq!(config.retrieval.mode, RetrievalMode::Direct);
    assert!(!config.retrieval.optimize_query);
    assert_eq!(config.retrieval.planner_step_budget, 3);

    // Validation defaults
    assert_eq!(config.validation.pass_threshold, 0.65);
    assert!(config.validation.require_citations);

    // Pipeline defaults
    assert_eq!(config.pipeline.max_regeneration_attempts, 2);
    assert!(!config.pipeline.persist_traces);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[pipeline]
max_regeneration_attempts = 4

[retrieval]
mode = "planned"

[retrieval.summary]
k = 8
score_threshold = 0.5
"#;
    let config = SiftConfig::from_toml(toml).unwrap();
    assert_eq!(config.pipeline.max_regeneration_attempts, 4);
    assert_eq!(config.retrieval.mode, RetrievalMode::Planned);
    assert_eq!(config.retrieval.summary.k, 8);
    // Non-overridden fields keep defaults
    assert_eq!(config.retrieval.search.k, 4);
    assert_eq!(config.pipeline.trace_dir, "traces");
    assert_eq!(config.validation.weights.alignment, 0.30);
}

#[test]
fn general_intent_shares_search_profile() {
    let config = RetrievalConfig::default();
    assert_eq!(config.profile(Intent::General), config.profile(Intent::Search));
    assert_eq!(config.profile(Intent::Summary).score_threshold, 0.4);
    assert_eq!(config.profile(Intent::Comparison).score_threshold, 0.3);
}

#[test]
fn default_weights_sum_to_one() {
    let weights = CriteriaWeights::default();
    assert!((weights.total() - 1.0).abs() < 1e-9);
}

#[test]
fn zero_attempt_cap_is_rejected() {
    let err = SiftConfig::from_toml("[pipeline]\nmax_regeneration_attempts = 0\n").unwrap_err();
    assert!(matches!(err, SiftError::ConfigError(_)));
    assert!(err.to_string().contains("max_regeneration_attempts"));
}

#[test]
fn threshold_outside_unit_range_is_rejected() {
    let err = SiftConfig::from_toml("[validation]\npass_threshold = 1.5\n").unwrap_err();
    assert!(err.to_string().contains("validation.pass_threshold"));
}

#[test]
fn zero_k_is_rejected() {
    let err = SiftConfig::from_toml("[retrieval.search]\nk = 0\nscore_threshold = 0.0\n")
        .unwrap_err();
    assert!(err.to_string().contains("retrieval.search.k"));
}

#[test]
fn unbalanced_weights_are_rejected() {
    let toml = r#"
[validation.weights]
coherence = 0.5
alignment = 0.5
groundedness = 0.5
completeness = 0.0
citation = 0.0
"#;
    let err = SiftConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("validation.weights"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = SiftConfig::from_toml("[pipeline\n").unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sift.toml");
    std::fs::write(&path, "[llm]\ncall_delay_ms = 0\n").unwrap();

    let config = SiftConfig::from_file(&path).unwrap();
    assert_eq!(config.llm.call_delay_ms, 0);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = SiftConfig::from_file("/definitely/not/here/sift.toml").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here/sift.toml"));
}
