//! The generator unit.

use std::sync::Arc;

use sift_core::config::GenerationConfig;
use sift_core::errors::LlmError;
use sift_core::models::{Prompt, SourceRef};
use sift_core::traits::{IGenerator, ILanguageModel};
use sift_core::{GenerationResult, Intent, RetrievedDocument, SiftResult};
use sift_observability::tracing_setup::events;
use tracing::info;

use crate::context::format_context;
use crate::prompts::{conversational_prompt, grounded_prompt};

/// Language-model answer writer.
pub struct Generator {
    model: Arc<dyn ILanguageModel>,
    config: GenerationConfig,
}

impl Generator {
    pub fn new(model: Arc<dyn ILanguageModel>, config: GenerationConfig) -> Self {
        Self { model, config }
    }

    /// Reply to a query without documents.
    pub fn converse(&self, query: &str) -> GenerationResult {
        match self.ask(&conversational_prompt(query)) {
            Ok(text) => GenerationResult {
                response_text: text,
                used_retrieval: false,
                document_count: 0,
                intent: Intent::General,
                sources: Vec::new(),
            },
            Err(e) => self.degraded(Intent::General, &e.to_string()),
        }
    }

    fn ask(&self, prompt: &Prompt) -> SiftResult<String> {
        let reply = self.model.invoke(prompt)?;
        let text = reply.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse {
                backend: self.model.name().to_string(),
            }
            .into());
        }
        Ok(text.to_string())
    }

    fn degraded(&self, intent: Intent, failure: &str) -> GenerationResult {
        events::unit_degraded("generator", failure, "error response");
        GenerationResult::degraded(intent, failure)
    }
}

impl IGenerator for Generator {
    fn generate(
        &self,
        query: &str,
        intent: Intent,
        documents: &[RetrievedDocument],
    ) -> GenerationResult {
        let span = sift_observability::generation_span!(intent, documents.len());
        let _guard = span.enter();

        if documents.is_empty() && intent == Intent::General {
            return self.converse(query);
        }

        let context = format_context(documents, self.config.max_document_chars);
        match self.ask(&grounded_prompt(query, intent, &context)) {
            Ok(text) => {
                info!(response_len = text.len(), documents = documents.len(), "response generated");
                GenerationResult {
                    response_text: text,
                    used_retrieval: !documents.is_empty(),
                    document_count: documents.len(),
                    intent,
                    sources: SourceRef::from_documents(documents),
                }
            }
            Err(e) => self.degraded(intent, &e.to_string()),
        }
    }
}
