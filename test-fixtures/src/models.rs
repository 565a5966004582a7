//! Language-model doubles.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use sift_core::errors::LlmError;
use sift_core::models::Prompt;
use sift_core::traits::ILanguageModel;
use sift_core::SiftResult;

/// Replays canned replies in order. `Err` entries become request failures.
/// Once the script runs out, the last entry repeats.
pub struct ScriptedModel {
    script: Mutex<VecDeque<Result<String, String>>>,
    last: Mutex<Option<Result<String, String>>>,
    prompts: Mutex<Vec<Prompt>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn new<S: Into<String>>(replies: Vec<S>) -> Self {
        Self::with_results(replies.into_iter().map(|r| Ok(r.into())).collect())
    }

    pub fn with_results(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A model that always answers `reply`.
    pub fn always(reply: impl Into<String>) -> Self {
        Self::new(vec![reply.into()])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ILanguageModel for ScriptedModel {
    fn invoke(&self, prompt: &Prompt) -> SiftResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());

        let next = self.script.lock().unwrap().pop_front();
        let entry = match next {
            Some(entry) => {
                *self.last.lock().unwrap() = Some(entry.clone());
                entry
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Err("script is empty".to_string())),
        };

        entry.map_err(|reason| {
            LlmError::RequestFailed {
                backend: "scripted".to_string(),
                reason,
            }
            .into()
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// A backend that is always down.
#[derive(Default)]
pub struct FailingModel {
    calls: AtomicUsize,
}

impl FailingModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ILanguageModel for FailingModel {
    fn invoke(&self, _prompt: &Prompt) -> SiftResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LlmError::Unavailable {
            backend: "failing".to_string(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing"
    }
}
