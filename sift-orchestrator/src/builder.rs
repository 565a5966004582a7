//! Wiring a complete orchestrator from configuration.

use std::sync::Arc;

use sift_classifier::{KeywordClassifier, ModelClassifier};
use sift_core::config::{ClassifierStrategy, RetrievalMode};
use sift_core::traits::{IClassifier, IDocumentSource};
use sift_core::{SiftConfig, SiftResult};
use sift_generation::Generator;
use sift_llm::backend_for_role;
use sift_observability::{JsonTraceExporter, TraceStore};
use sift_retrieval::Retriever;
use sift_validation::Validator;
use tracing::info;

use crate::orchestrator::Orchestrator;

/// Builds an [`Orchestrator`] whose units talk to the HTTP backends named in
/// the configuration, each behind the configured call throttle.
pub struct PipelineBuilder {
    config: SiftConfig,
    source: Arc<dyn IDocumentSource>,
    trace_store: Option<TraceStore>,
}

impl PipelineBuilder {
    pub fn from_config(config: SiftConfig, source: Arc<dyn IDocumentSource>) -> Self {
        Self {
            config,
            source,
            trace_store: None,
        }
    }

    pub fn with_trace_store(mut self, store: TraceStore) -> Self {
        self.trace_store = Some(store);
        self
    }

    /// Validate the configuration and construct every unit.
    ///
    /// Fails if a backend's API key variable is unset.
    pub fn build(self) -> SiftResult<Orchestrator> {
        self.config.validate()?;
        let llm = &self.config.llm;

        let classifier: Arc<dyn IClassifier> = match self.config.classifier.strategy {
            ClassifierStrategy::Keyword => Arc::new(KeywordClassifier::new()),
            ClassifierStrategy::Model => Arc::new(ModelClassifier::new(
                backend_for_role(llm, llm.roles.classifier)?,
                self.config.classifier.clone(),
            )),
        };

        let retrieval = self.config.retrieval.clone();
        let retriever = if retrieval.mode == RetrievalMode::Planned || retrieval.optimize_query {
            Retriever::with_model(
                Arc::clone(&self.source),
                backend_for_role(llm, llm.roles.retriever)?,
                retrieval,
            )
        } else {
            Retriever::new(Arc::clone(&self.source), retrieval)
        };

        let generator = Generator::new(
            backend_for_role(llm, llm.roles.generator)?,
            self.config.generation.clone(),
        );
        let validator = Validator::new(
            backend_for_role(llm, llm.roles.validator)?,
            self.config.validation.clone(),
        );

        let pipeline = &self.config.pipeline;
        let mut orchestrator = Orchestrator::new(
            classifier,
            Arc::new(retriever),
            Arc::new(generator),
            Arc::new(validator),
            pipeline.clone(),
        );
        if let Some(store) = self.trace_store {
            orchestrator = orchestrator.with_trace_store(store);
        }
        if pipeline.persist_traces {
            orchestrator =
                orchestrator.with_trace_sink(Box::new(JsonTraceExporter::new(&pipeline.trace_dir)));
        }

        info!(
            classifier = ?self.config.classifier.strategy,
            retrieval = ?self.config.retrieval.mode,
            max_attempts = pipeline.max_regeneration_attempts,
            "pipeline built"
        );
        Ok(orchestrator)
    }
}
