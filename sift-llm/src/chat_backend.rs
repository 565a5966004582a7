//! OpenAI-compatible chat-completions backend.
//!
//! Works with any endpoint speaking the `/chat/completions` dialect
//! (Gemini's OpenAI surface, Groq, OpenAI). Retries transport failures and
//! 5xx/429 replies with exponential backoff.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sift_core::config::BackendProfile;
use sift_core::errors::{ConfigError, LlmError};
use sift_core::models::Prompt;
use sift_core::traits::ILanguageModel;
use sift_core::SiftResult;
use tracing::{debug, warn};

/// Consecutive failed calls after which the backend reports itself unavailable.
const UNAVAILABLE_AFTER_FAILURES: u32 = 3;

/// Backoff before the first retry; doubles per retry.
const BASE_BACKOFF_MS: u64 = 200;
/// Doubling stops here (200ms * 2^6, about 13s).
const MAX_BACKOFF_DOUBLINGS: u32 = 6;

/// Blocking HTTP chat backend.
pub struct HttpChatModel {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
    max_retries: u32,
    consecutive_failures: AtomicU32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl HttpChatModel {
    /// Create a backend with an explicit API key.
    pub fn new(profile: &BackendProfile, api_key: String) -> SiftResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(profile.timeout_secs))
            .build()
            .map_err(|e| LlmError::RequestFailed {
                backend: profile.model.clone(),
                reason: format!("client setup failed: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: profile.endpoint.clone(),
            model: profile.model.clone(),
            api_key,
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
            max_retries: 2,
            consecutive_failures: AtomicU32::new(0),
        })
    }

    /// Create a backend reading the API key from the profile's environment variable.
    pub fn from_profile(profile: &BackendProfile) -> SiftResult<Self> {
        let api_key = std::env::var(&profile.api_key_env).map_err(|_| ConfigError::MissingEnv {
            name: profile.api_key_env.clone(),
            backend: profile.model.clone(),
        })?;
        Self::new(profile, api_key)
    }

    /// Override the retry count (default 2).
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Whether recent calls have been succeeding.
    pub fn is_available(&self) -> bool {
        self.consecutive_failures.load(Ordering::Relaxed) < UNAVAILABLE_AFTER_FAILURES
    }

    fn send_once(&self, body: &str) -> Result<String, (LlmError, bool)> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .map_err(|e| {
                (
                    LlmError::RequestFailed {
                        backend: self.model.clone(),
                        reason: e.to_string(),
                    },
                    true,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let retryable = status.is_server_error() || status.as_u16() == 429;
            let body = response.text().unwrap_or_default();
            return Err((
                LlmError::BadStatus {
                    backend: self.model.clone(),
                    status: status.as_u16(),
                    body,
                },
                retryable,
            ));
        }

        let parsed: ChatResponse = response.json().map_err(|e| {
            (
                LlmError::MalformedOutput {
                    reason: format!("unreadable chat response from {}: {e}", self.model),
                },
                false,
            )
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                (
                    LlmError::EmptyResponse {
                        backend: self.model.clone(),
                    },
                    false,
                )
            })
    }
}

impl ILanguageModel for HttpChatModel {
    fn invoke(&self, prompt: &Prompt) -> SiftResult<String> {
        let body = serde_json::to_string(&ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })?;

        let mut attempt = 0;
        loop {
            if attempt > 0 {
                std::thread::sleep(backoff_delay(attempt));
                debug!(backend = %self.model, attempt, "retrying chat request");
            }

            match self.send_once(&body) {
                Ok(text) => {
                    self.consecutive_failures.store(0, Ordering::Relaxed);
                    return Ok(text);
                }
                Err((err, retryable)) => {
                    warn!(backend = %self.model, attempt, error = %err, "chat request failed");
                    if !retryable || attempt >= self.max_retries {
                        self.consecutive_failures.fetch_add(1, Ordering::Relaxed);
                        return Err(err.into());
                    }
                }
            }
            attempt += 1;
        }
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Sleep before retry number `attempt` (1-based).
fn backoff_delay(attempt: u32) -> Duration {
    let doublings = attempt.saturating_sub(1).min(MAX_BACKOFF_DOUBLINGS);
    Duration::from_millis(BASE_BACKOFF_MS << doublings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_levels_off() {
        assert_eq!(backoff_delay(1), Duration::from_millis(200));
        assert_eq!(backoff_delay(2), Duration::from_millis(400));
        assert_eq!(backoff_delay(7), Duration::from_millis(12_800));
        assert_eq!(backoff_delay(8), backoff_delay(7));
        assert_eq!(backoff_delay(u32::MAX), backoff_delay(7));
    }
}
