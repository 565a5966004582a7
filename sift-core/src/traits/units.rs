//! Contracts of the four decision units.
//!
//! Units never return errors: internal failures become typed fallback
//! values at the unit boundary.

use crate::intent::Intent;
use crate::models::{Classification, GenerationResult, RetrievedDocument, ValidationResult};

/// Decides what kind of question a query is.
pub trait IClassifier: Send + Sync {
    fn classify(&self, query: &str) -> Classification;

    /// Whether a call spends a model request.
    fn uses_model(&self) -> bool {
        true
    }
}

/// Result of one retrieval with the bookkeeping the trace records.
#[derive(Debug, Clone, Default)]
pub struct RetrievalOutcome {
    pub documents: Vec<RetrievedDocument>,
    pub model_calls: u32,
    /// Short name of the strategy that produced the documents.
    pub strategy: String,
    /// The key actually searched, when it differs from the literal query.
    pub rewritten_query: Option<String>,
}

impl RetrievalOutcome {
    pub fn direct(documents: Vec<RetrievedDocument>) -> Self {
        Self {
            documents,
            model_calls: 0,
            strategy: "direct".to_string(),
            rewritten_query: None,
        }
    }
}

/// Fetches supporting documents for a query.
pub trait IRetriever: Send + Sync {
    /// Documents for `query`, sized by `intent`. Empty on failure.
    fn retrieve(&self, query: &str, intent: Intent) -> Vec<RetrievedDocument>;

    /// Like [`IRetriever::retrieve`] but also reports how the documents were found.
    fn retrieve_detailed(&self, query: &str, intent: Intent) -> RetrievalOutcome {
        RetrievalOutcome::direct(self.retrieve(query, intent))
    }
}

/// Writes the answer.
pub trait IGenerator: Send + Sync {
    fn generate(
        &self,
        query: &str,
        intent: Intent,
        documents: &[RetrievedDocument],
    ) -> GenerationResult;

    fn uses_model(&self) -> bool {
        true
    }
}

/// Judges an answer against the query and its evidence.
pub trait IValidator: Send + Sync {
    fn validate(
        &self,
        query: &str,
        response: &str,
        documents: &[RetrievedDocument],
    ) -> ValidationResult;

    fn uses_model(&self) -> bool {
        true
    }
}
