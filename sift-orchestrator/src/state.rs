use sift_core::models::{Component, RunStatus};
use sift_core::{Classification, GenerationResult, RetrievedDocument, ValidationResult};

/// Position of a run in the pipeline state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Start,
    Classified,
    Retrieved,
    Generated,
    Validated,
    Regenerating,
    Done,
}

/// Everything a run has produced so far.
#[derive(Debug)]
pub(crate) struct RunState {
    pub stage: Stage,
    pub classification: Option<Classification>,
    /// Retrieved once; every generation attempt reuses it.
    pub documents: Vec<RetrievedDocument>,
    pub generation: Option<GenerationResult>,
    pub validation: Option<ValidationResult>,
    pub attempts: u32,
    /// Designed terminal status, set when the run reaches `Done`.
    pub outcome: Option<RunStatus>,
    /// Unit currently being called, for attributing a panic.
    pub active: Option<Component>,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            stage: Stage::Start,
            classification: None,
            documents: Vec::new(),
            generation: None,
            validation: None,
            attempts: 0,
            outcome: None,
            active: None,
        }
    }

    pub fn finish(&mut self, status: RunStatus) -> Stage {
        self.outcome = Some(status);
        Stage::Done
    }
}
