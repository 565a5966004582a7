//! Unit doubles that count and record their invocations.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use sift_core::models::SourceRef;
use sift_core::traits::{IClassifier, IGenerator, IRetriever, IValidator};
use sift_core::{Classification, GenerationResult, Intent, RetrievedDocument, ValidationResult};

/// Always returns the same classification.
pub struct FixedClassifier {
    classification: Classification,
    calls: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(classification: Classification) -> Self {
        Self {
            classification,
            calls: AtomicUsize::new(0),
        }
    }

    /// Classify everything as `intent` with full confidence.
    pub fn intent(intent: Intent) -> Self {
        Self::new(Classification::new(
            intent,
            1.0,
            intent.needs_documents(),
            "fixed",
        ))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IClassifier for FixedClassifier {
    fn classify(&self, _query: &str) -> Classification {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.classification.clone()
    }

    fn uses_model(&self) -> bool {
        false
    }
}

/// Returns a fixed document list and records the queries it saw.
pub struct RecordingRetriever {
    documents: Vec<RetrievedDocument>,
    queries: Mutex<Vec<(String, Intent)>>,
}

impl RecordingRetriever {
    pub fn new(documents: Vec<RetrievedDocument>) -> Self {
        Self {
            documents,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<(String, Intent)> {
        self.queries.lock().unwrap().clone()
    }
}

impl IRetriever for RecordingRetriever {
    fn retrieve(&self, query: &str, intent: Intent) -> Vec<RetrievedDocument> {
        self.queries.lock().unwrap().push((query.to_string(), intent));
        self.documents.clone()
    }
}

/// Produces scripted responses in order, repeating the last one.
/// Records the fingerprints of the documents each call received.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    seen: Mutex<Vec<Vec<String>>>,
}

impl ScriptedGenerator {
    pub fn new<S: Into<String>>(responses: Vec<S>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            last: Mutex::new("generated answer [Source 1]".to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn document_counts(&self) -> Vec<usize> {
        self.seen.lock().unwrap().iter().map(Vec::len).collect()
    }

    /// Document fingerprints per call, in call order.
    pub fn seen_documents(&self) -> Vec<Vec<String>> {
        self.seen.lock().unwrap().clone()
    }
}

impl IGenerator for ScriptedGenerator {
    fn generate(
        &self,
        _query: &str,
        intent: Intent,
        documents: &[RetrievedDocument],
    ) -> GenerationResult {
        self.seen
            .lock()
            .unwrap()
            .push(documents.iter().map(RetrievedDocument::fingerprint).collect());
        let text = match self.responses.lock().unwrap().pop_front() {
            Some(text) => {
                *self.last.lock().unwrap() = text.clone();
                text
            }
            None => self.last.lock().unwrap().clone(),
        };
        GenerationResult {
            response_text: text,
            used_retrieval: !documents.is_empty(),
            document_count: documents.len(),
            intent,
            sources: SourceRef::from_documents(documents),
        }
    }

    fn uses_model(&self) -> bool {
        false
    }
}

/// Panics on every call.
pub struct PanickingGenerator;

impl IGenerator for PanickingGenerator {
    fn generate(&self, _: &str, _: Intent, _: &[RetrievedDocument]) -> GenerationResult {
        panic!("generator exploded");
    }
}

/// Replays verdicts in order, repeating the last one, and counts calls.
pub struct CountingValidator {
    verdicts: Mutex<VecDeque<ValidationResult>>,
    last: Mutex<ValidationResult>,
    calls: AtomicUsize,
}

impl CountingValidator {
    pub fn new(verdicts: Vec<ValidationResult>) -> Self {
        Self {
            verdicts: Mutex::new(verdicts.into()),
            last: Mutex::new(Self::pass()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Accepts every answer.
    pub fn passing() -> Self {
        Self::new(vec![Self::pass()])
    }

    /// Rejects every answer.
    pub fn failing() -> Self {
        Self::new(vec![Self::fail()])
    }

    pub fn pass() -> ValidationResult {
        ValidationResult::new(true, 0.9, Vec::new(), None, None)
    }

    pub fn fail() -> ValidationResult {
        ValidationResult::new(false, 0.3, vec!["claims not supported".to_string()], None, None)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IValidator for CountingValidator {
    fn validate(&self, _: &str, _: &str, _: &[RetrievedDocument]) -> ValidationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.verdicts.lock().unwrap().pop_front() {
            Some(verdict) => {
                *self.last.lock().unwrap() = verdict.clone();
                verdict
            }
            None => self.last.lock().unwrap().clone(),
        }
    }

    fn uses_model(&self) -> bool {
        false
    }
}
