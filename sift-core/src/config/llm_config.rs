use serde::{Deserialize, Serialize};

use super::defaults;

/// Which backend profile a unit talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendRole {
    /// Tuned for deep contextual reasoning (classification, validation).
    Reasoning,
    /// Tuned for low-latency generation (query optimization, synthesis).
    Fast,
}

/// Connection settings for one OpenAI-compatible chat backend.
///
/// Fields missing from a partial TOML table take the fast profile's values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendProfile {
    /// Chat-completions endpoint URL.
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl BackendProfile {
    pub fn reasoning() -> Self {
        Self {
            endpoint: defaults::DEFAULT_REASONING_ENDPOINT.to_string(),
            model: defaults::DEFAULT_REASONING_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_REASONING_API_KEY_ENV.to_string(),
            ..Self::default()
        }
    }

    pub fn fast() -> Self {
        Self::default()
    }
}

impl Default for BackendProfile {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_FAST_ENDPOINT.to_string(),
            model: defaults::DEFAULT_FAST_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_FAST_API_KEY_ENV.to_string(),
            temperature: defaults::DEFAULT_TEMPERATURE,
            max_tokens: defaults::DEFAULT_MAX_TOKENS,
            timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Backend role assigned to each unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitRoles {
    pub classifier: BackendRole,
    pub retriever: BackendRole,
    pub generator: BackendRole,
    pub validator: BackendRole,
}

impl Default for UnitRoles {
    fn default() -> Self {
        Self {
            classifier: BackendRole::Reasoning,
            retriever: BackendRole::Fast,
            generator: BackendRole::Fast,
            validator: BackendRole::Reasoning,
        }
    }
}

/// Language-model backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub reasoning: BackendProfile,
    pub fast: BackendProfile,
    pub roles: UnitRoles,
    /// Fixed delay inserted before every backend call (rate-limit throttle).
    pub call_delay_ms: u64,
}

impl LlmConfig {
    /// Profile for a given role.
    pub fn profile(&self, role: BackendRole) -> &BackendProfile {
        match role {
            BackendRole::Reasoning => &self.reasoning,
            BackendRole::Fast => &self.fast,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            reasoning: BackendProfile::reasoning(),
            fast: BackendProfile::fast(),
            roles: UnitRoles::default(),
            call_delay_ms: defaults::DEFAULT_CALL_DELAY_MS,
        }
    }
}
