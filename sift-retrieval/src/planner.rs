//! Step-bounded retrieval planning.
//!
//! The model picks one action per step from a closed capability set. Search
//! actions always use the literal query unless an [`Capability::OptimizeQuery`]
//! action ran earlier in the same call.

use std::sync::Arc;

use serde_json::{Map, Value};
use sift_core::config::SearchProfile;
use sift_core::errors::LlmError;
use sift_core::models::Prompt;
use sift_core::traits::{IDocumentSource, ILanguageModel, MetadataFilter};
use sift_core::{Intent, RetrievedDocument, SiftResult};
use sift_llm::parse_json_object;
use tracing::{debug, info};

use crate::optimizer::QueryOptimizer;
use crate::rank::dedupe;

/// Largest `k` a planner action may request.
pub const MAX_PLANNER_K: usize = 10;

/// The actions the planner may take.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    SearchByQuery { k: usize, threshold: f64 },
    SearchByMetadata { filter: MetadataFilter, k: usize },
    OptimizeQuery,
    Finish,
}

impl Capability {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchByQuery { .. } => "search_by_query",
            Self::SearchByMetadata { .. } => "search_by_metadata",
            Self::OptimizeQuery => "optimize_query",
            Self::Finish => "finish",
        }
    }

    /// Map one planner reply object to an action. `k` and `threshold`
    /// default to the intent's profile and are clamped to valid ranges.
    pub fn from_reply(map: &Map<String, Value>, profile: SearchProfile) -> SiftResult<Self> {
        let action = map
            .get("action")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("planner reply has no action"))?;

        let k = map
            .get("k")
            .and_then(Value::as_u64)
            .map(|k| k as usize)
            .unwrap_or(profile.k)
            .clamp(1, MAX_PLANNER_K);

        match action.trim().to_lowercase().as_str() {
            "search_by_query" | "search_documents" | "search" => {
                let threshold = map
                    .get("threshold")
                    .or_else(|| map.get("score_threshold"))
                    .and_then(Value::as_f64)
                    .unwrap_or(profile.score_threshold)
                    .clamp(0.0, 1.0);
                Ok(Self::SearchByQuery { k, threshold })
            }
            "search_by_metadata" => {
                let filter: MetadataFilter = map
                    .get("filter")
                    .and_then(Value::as_object)
                    .map(|obj| {
                        obj.iter()
                            .filter_map(|(key, v)| {
                                let value = match v {
                                    Value::String(s) => s.clone(),
                                    Value::Null => return None,
                                    other => other.to_string(),
                                };
                                Some((key.clone(), value))
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                if filter.is_empty() {
                    return Err(malformed("search_by_metadata needs a non-empty filter"));
                }
                Ok(Self::SearchByMetadata { filter, k })
            }
            "optimize_query" => Ok(Self::OptimizeQuery),
            "finish" | "done" => Ok(Self::Finish),
            other => Err(malformed(&format!("unknown planner action {other:?}"))),
        }
    }
}

fn malformed(reason: &str) -> sift_core::SiftError {
    LlmError::MalformedOutput {
        reason: reason.to_string(),
    }
    .into()
}

/// What a planning run produced.
#[derive(Debug, Clone, Default)]
pub struct PlanOutcome {
    pub documents: Vec<RetrievedDocument>,
    pub actions: Vec<&'static str>,
    pub model_calls: u32,
    pub rewritten_query: Option<String>,
}

/// Runs the capability loop against a document source.
pub struct RetrievalPlanner {
    model: Arc<dyn ILanguageModel>,
    optimizer: QueryOptimizer,
    step_budget: usize,
}

const SYSTEM_PROMPT: &str = r#"You plan document retrieval for a question-answering system.
Choose ONE next action. Available actions:
- {"action": "search_by_query", "k": 4, "threshold": 0.0}: semantic search with the current search key
- {"action": "search_by_metadata", "filter": {"source": "file.pdf"}, "k": 4}: documents whose metadata matches exactly; use when the user names a specific document
- {"action": "optimize_query"}: rewrite the search key with synonyms and related terms; use when the query is short, vague, or ambiguous
- {"action": "finish"}: stop; the documents found so far are enough

Guidance: search 3-5 documents for specific questions, 8-10 for summaries, 4-6 for comparisons.
Be efficient: do not search more than needed.
Reply with ONLY the JSON object of your chosen action."#;

impl RetrievalPlanner {
    pub fn new(model: Arc<dyn ILanguageModel>, step_budget: usize) -> Self {
        Self {
            optimizer: QueryOptimizer::new(Arc::clone(&model)),
            model,
            step_budget: step_budget.max(1),
        }
    }

    /// Run up to `step_budget` actions.
    ///
    /// Errors when the very first planner call fails or when no search action
    /// ran at all, so the caller can fall back to direct retrieval.
    pub fn run(
        &self,
        source: &dyn IDocumentSource,
        query: &str,
        intent: Intent,
        profile: SearchProfile,
    ) -> SiftResult<PlanOutcome> {
        let mut outcome = PlanOutcome::default();
        let mut search_key = query.to_string();
        let mut searched = false;

        for step in 0..self.step_budget {
            outcome.model_calls += 1;
            let action = match self.next_action(query, &search_key, intent, profile, &outcome) {
                Ok(action) => action,
                Err(e) if step == 0 => return Err(e),
                Err(e) => {
                    debug!(step, error = %e, "planner stopped early");
                    break;
                }
            };
            outcome.actions.push(action.name());
            debug!(step, action = action.name(), "planner action");

            match action {
                Capability::SearchByQuery { k, threshold } => {
                    let found = source.search(&search_key, k, threshold)?;
                    outcome.documents.extend(found);
                    searched = true;
                }
                Capability::SearchByMetadata { filter, k } => {
                    let found = source.search_by_metadata(&filter, k)?;
                    outcome.documents.extend(found);
                    searched = true;
                }
                Capability::OptimizeQuery => {
                    outcome.model_calls += 1;
                    if let Ok(optimized) = self.optimizer.optimize(query, intent) {
                        outcome.rewritten_query = Some(optimized.clone());
                        search_key = optimized;
                    }
                }
                Capability::Finish => break,
            }
        }

        if !searched {
            return Err(malformed("planner finished without searching"));
        }
        outcome.documents = dedupe(outcome.documents);
        info!(
            actions = ?outcome.actions,
            documents = outcome.documents.len(),
            "retrieval plan executed"
        );
        Ok(outcome)
    }

    fn next_action(
        &self,
        query: &str,
        search_key: &str,
        intent: Intent,
        profile: SearchProfile,
        progress: &PlanOutcome,
    ) -> SiftResult<Capability> {
        let user = format!(
            "Query: {query}\nIntent: {intent}\nCurrent search key: {search_key}\n\
             Default k: {}\nDefault threshold: {}\nActions taken: {:?}\nDocuments found so far: {}",
            profile.k,
            profile.score_threshold,
            progress.actions,
            progress.documents.len(),
        );
        let reply = self.model.invoke(&Prompt::new(SYSTEM_PROMPT, user))?;
        let map = parse_json_object(&reply)?;
        Capability::from_reply(&map, profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> SearchProfile {
        SearchProfile {
            k: 4,
            score_threshold: 0.2,
        }
    }

    fn reply(json: &str) -> Map<String, Value> {
        parse_json_object(json).unwrap()
    }

    #[test]
    fn search_defaults_to_profile() {
        let action = Capability::from_reply(&reply(r#"{"action": "search_by_query"}"#), profile()).unwrap();
        assert_eq!(action, Capability::SearchByQuery { k: 4, threshold: 0.2 });
    }

    #[test]
    fn k_and_threshold_are_clamped() {
        let action = Capability::from_reply(
            &reply(r#"{"action": "search_by_query", "k": 500, "threshold": 3}"#),
            profile(),
        )
        .unwrap();
        assert_eq!(
            action,
            Capability::SearchByQuery {
                k: MAX_PLANNER_K,
                threshold: 1.0
            }
        );
    }

    #[test]
    fn metadata_filter_values_are_stringified() {
        let action = Capability::from_reply(
            &reply(r#"{"action": "search_by_metadata", "filter": {"source": "a.pdf", "chunk_index": 2}}"#),
            profile(),
        )
        .unwrap();
        match action {
            Capability::SearchByMetadata { filter, k } => {
                assert_eq!(filter["source"], "a.pdf");
                assert_eq!(filter["chunk_index"], "2");
                assert_eq!(k, 4);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn empty_metadata_filter_is_rejected() {
        assert!(Capability::from_reply(&reply(r#"{"action": "search_by_metadata"}"#), profile()).is_err());
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(Capability::from_reply(&reply(r#"{"action": "delete_index"}"#), profile()).is_err());
    }
}
