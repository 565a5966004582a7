//! Full pipeline runs with the real units over scripted backends.

use std::sync::Arc;

use sift_classifier::ModelClassifier;
use sift_core::config::{
    ClassifierConfig, GenerationConfig, PipelineConfig, RetrievalConfig, ValidationConfig,
};
use sift_core::models::{Component, RunStatus};
use sift_core::traits::ILanguageModel;
use sift_core::Intent;
use sift_generation::Generator;
use sift_orchestrator::Orchestrator;
use sift_retrieval::Retriever;
use sift_validation::Validator;
use test_fixtures::{load_documents, FailingModel, ScriptedModel, StaticSource};

const SEARCH_REPLY: &str =
    r#"{"intent": "search", "confidence": 0.92, "requires_retrieval": true, "reasoning": "lookup"}"#;
const GENERAL_REPLY: &str =
    r#"{"intent": "general", "confidence": 0.95, "requires_retrieval": false, "reasoning": "greeting"}"#;
const WEAK_VERDICT: &str = r#"{"coherence": 0.8, "alignment": 0.7, "groundedness": 0.3,
    "completeness": 0.7, "citation": 0.2, "needs_regeneration": true, "issues": ["invented date"]}"#;
const STRONG_VERDICT: &str = r#"{"coherence": 0.9, "alignment": 0.9, "groundedness": 0.95,
    "completeness": 0.85, "citation": 0.9, "needs_regeneration": false, "issues": []}"#;

fn pipeline(
    classifier_model: Arc<dyn ILanguageModel>,
    generator_model: Arc<dyn ILanguageModel>,
    validator_model: Arc<dyn ILanguageModel>,
) -> Orchestrator {
    let source = Arc::new(StaticSource::new(load_documents("rust_handbook")));
    Orchestrator::new(
        Arc::new(ModelClassifier::new(classifier_model, ClassifierConfig::default())),
        Arc::new(Retriever::new(source, RetrievalConfig::default())),
        Arc::new(Generator::new(generator_model, GenerationConfig::default())),
        Arc::new(Validator::new(validator_model, ValidationConfig::default())),
        PipelineConfig::default(),
    )
}

#[test]
fn rejected_answer_is_regenerated_and_accepted() {
    let classifier = Arc::new(ScriptedModel::always(SEARCH_REPLY));
    let generator = Arc::new(ScriptedModel::new(vec![
        "Ownership was introduced in 2009.",
        "Each value has a single owner [Source 1].",
    ]));
    let validator = Arc::new(ScriptedModel::new(vec![WEAK_VERDICT, STRONG_VERDICT]));

    let result = pipeline(classifier.clone(), generator.clone(), validator.clone())
        .process_query("what is ownership?", None);

    assert_eq!(result.status, RunStatus::Answered);
    assert_eq!(result.intent, Intent::Search);
    assert_eq!(result.attempts, 2);
    assert_eq!(result.response, "Each value has a single owner [Source 1].");
    assert_eq!(result.documents_used, 4);
    assert!(result.validation.as_ref().unwrap().is_valid);
    assert_eq!(result.trace.regeneration_count, 1);
    assert_eq!(classifier.calls(), 1);
    assert_eq!(generator.calls(), 2);
    assert_eq!(validator.calls(), 2);
    assert_eq!(result.trace.summary.model_calls, 5);
}

#[test]
fn greeting_skips_retrieval_and_validation() {
    let classifier = Arc::new(ScriptedModel::always(GENERAL_REPLY));
    let generator = Arc::new(ScriptedModel::always("Hi! How can I help?"));
    let validator = Arc::new(ScriptedModel::always(STRONG_VERDICT));

    let result = pipeline(classifier, generator, validator.clone()).process_query("hello", None);

    assert_eq!(result.intent, Intent::General);
    assert_eq!(result.response, "Hi! How can I help?");
    assert_eq!(result.trace.steps.len(), 2);
    assert_eq!(validator.calls(), 0);
    assert!(result.sources.is_empty());
}

#[test]
fn classifier_outage_falls_back_to_search() {
    let generator = Arc::new(ScriptedModel::always("Borrowing is shared access [Source 2]."));
    let validator = Arc::new(ScriptedModel::always(STRONG_VERDICT));

    let result = pipeline(Arc::new(FailingModel::new()), generator, validator)
        .process_query("what is borrowing?", None);

    let classification = result.classification.as_ref().unwrap();
    assert_eq!(classification.intent, Intent::Search);
    assert!(classification.requires_retrieval);
    assert!(classification.rationale.starts_with("fallback classification after failure"));
    assert!(result.trace.invoked(Component::Retriever));
    assert_eq!(result.status, RunStatus::Answered);
}

#[test]
fn validator_outage_accepts_the_first_answer() {
    let classifier = Arc::new(ScriptedModel::always(SEARCH_REPLY));
    let generator = Arc::new(ScriptedModel::always("Lifetimes bound references [Source 3]."));
    let validator = Arc::new(FailingModel::new());

    let result =
        pipeline(classifier, generator.clone(), validator.clone()).process_query("lifetimes?", None);

    assert_eq!(result.attempts, 1);
    let validation = result.validation.as_ref().unwrap();
    assert!(validation.is_valid);
    assert!(!validation.needs_regeneration);
    assert_eq!(validator.calls(), 1);
    assert_eq!(generator.calls(), 1);
}

#[test]
fn generator_outage_still_returns_a_traced_answer() {
    let classifier = Arc::new(ScriptedModel::always(SEARCH_REPLY));
    let validator = Arc::new(ScriptedModel::always(WEAK_VERDICT));

    let result = pipeline(classifier, Arc::new(FailingModel::new()), validator)
        .process_query("what is ownership?", Some(2));

    assert_eq!(result.status, RunStatus::Answered);
    assert!(result.response.contains("could not be generated"));
    assert_eq!(result.attempts, 2);
    assert!(result.needs_regeneration());
}
