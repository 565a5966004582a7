use crate::errors::SiftResult;
use crate::models::Prompt;

/// A chat-style language-model backend.
pub trait ILanguageModel: Send + Sync {
    /// Send one prompt and return the raw text of the reply.
    fn invoke(&self, prompt: &Prompt) -> SiftResult<String>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
