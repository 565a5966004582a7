mod document_source;
mod language_model;
mod trace_sink;
mod units;

pub use document_source::{IDocumentSource, MetadataFilter};
pub use language_model::ILanguageModel;
pub use trace_sink::ITraceSink;
pub use units::{IClassifier, IGenerator, IRetriever, IValidator, RetrievalOutcome};
