//! The retriever unit.

use std::sync::Arc;

use sift_core::config::{RetrievalConfig, RetrievalMode, SearchProfile};
use sift_core::traits::{IDocumentSource, ILanguageModel, IRetriever, RetrievalOutcome};
use sift_core::{Intent, RetrievedDocument, SiftResult};
use sift_observability::tracing_setup::events;
use tracing::{info, warn};

use crate::comparison::{balanced_search, extract_concepts};
use crate::optimizer::QueryOptimizer;
use crate::planner::RetrievalPlanner;
use crate::rank::rank_and_filter;

/// Intent-aware retriever over an [`IDocumentSource`].
///
/// Without a model it always runs the direct strategy with the literal query.
pub struct Retriever {
    source: Arc<dyn IDocumentSource>,
    optimizer: Option<QueryOptimizer>,
    planner: Option<RetrievalPlanner>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Retriever with no model: direct strategy only.
    pub fn new(source: Arc<dyn IDocumentSource>, config: RetrievalConfig) -> Self {
        Self {
            source,
            optimizer: None,
            planner: None,
            config,
        }
    }

    /// Retriever that may use `model` for query optimization and planning,
    /// as enabled by `config`.
    pub fn with_model(
        source: Arc<dyn IDocumentSource>,
        model: Arc<dyn ILanguageModel>,
        config: RetrievalConfig,
    ) -> Self {
        let planner = (config.mode == RetrievalMode::Planned)
            .then(|| RetrievalPlanner::new(Arc::clone(&model), config.planner_step_budget));
        let optimizer = config
            .optimize_query
            .then(|| QueryOptimizer::new(model));
        Self {
            source,
            optimizer,
            planner,
            config,
        }
    }

    fn direct(&self, query: &str, intent: Intent, profile: SearchProfile) -> SiftResult<RetrievalOutcome> {
        if intent == Intent::Comparison && self.config.balance_comparisons {
            let concepts = extract_concepts(query);
            if concepts.len() >= 2 {
                let documents = balanced_search(self.source.as_ref(), query, &concepts, profile)?;
                return Ok(RetrievalOutcome {
                    documents,
                    model_calls: 0,
                    strategy: "balanced".to_string(),
                    rewritten_query: None,
                });
            }
        }

        let mut model_calls = 0;
        let mut rewritten_query = None;
        if let Some(optimizer) = &self.optimizer {
            model_calls += 1;
            match optimizer.optimize(query, intent) {
                Ok(optimized) => rewritten_query = Some(optimized),
                Err(e) => events::unit_degraded("retriever", &e.to_string(), "literal query"),
            }
        }

        let key = rewritten_query.as_deref().unwrap_or(query);
        let documents = self.source.search(key, profile.k, profile.score_threshold)?;
        Ok(RetrievalOutcome {
            documents,
            model_calls,
            strategy: if rewritten_query.is_some() { "optimized" } else { "direct" }.to_string(),
            rewritten_query,
        })
    }

    fn gather(&self, query: &str, intent: Intent, profile: SearchProfile) -> SiftResult<RetrievalOutcome> {
        let Some(planner) = &self.planner else {
            return self.direct(query, intent, profile);
        };

        match planner.run(self.source.as_ref(), query, intent, profile) {
            Ok(plan) => Ok(RetrievalOutcome {
                documents: plan.documents,
                model_calls: plan.model_calls,
                strategy: format!("planned:{}", plan.actions.join(",")),
                rewritten_query: plan.rewritten_query,
            }),
            Err(e) => {
                events::unit_degraded("retriever", &e.to_string(), "direct retrieval");
                let mut outcome = self.direct(query, intent, profile)?;
                // The failed planner call still counts.
                outcome.model_calls += 1;
                outcome.strategy = format!("planned_fallback:{}", outcome.strategy);
                Ok(outcome)
            }
        }
    }
}

impl IRetriever for Retriever {
    fn retrieve(&self, query: &str, intent: Intent) -> Vec<RetrievedDocument> {
        self.retrieve_detailed(query, intent).documents
    }

    fn retrieve_detailed(&self, query: &str, intent: Intent) -> RetrievalOutcome {
        let span = sift_observability::retrieval_span!(query, intent);
        let _guard = span.enter();

        if !self.source.is_ready() {
            warn!("document source not ready, returning no documents");
            return RetrievalOutcome::direct(Vec::new());
        }

        let profile = self.config.profile(intent);
        match self.gather(query, intent, profile) {
            Ok(mut outcome) => {
                let mut ranked = rank_and_filter(outcome.documents, profile.score_threshold);
                ranked.truncate(profile.k);
                outcome.documents = ranked;
                info!(
                    strategy = %outcome.strategy,
                    k = profile.k,
                    documents = outcome.documents.len(),
                    "documents retrieved"
                );
                outcome
            }
            Err(e) => {
                events::unit_degraded("retriever", &e.to_string(), "empty result");
                RetrievalOutcome::direct(Vec::new())
            }
        }
    }
}
