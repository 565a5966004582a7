// Single source of truth for all default values.

// --- Backends ---
pub const DEFAULT_REASONING_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";
pub const DEFAULT_REASONING_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REASONING_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_FAST_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_FAST_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_FAST_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_MAX_TOKENS: u32 = 2_048;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CALL_DELAY_MS: u64 = 1_500;

// --- Classifier ---
pub const DEFAULT_CLASSIFIER_FALLBACK_CONFIDENCE: f64 = 0.5;

// --- Retrieval ---
pub const DEFAULT_SEARCH_K: usize = 4;
pub const DEFAULT_SEARCH_THRESHOLD: f64 = 0.0;
pub const DEFAULT_SUMMARY_K: usize = 10;
pub const DEFAULT_SUMMARY_THRESHOLD: f64 = 0.4;
pub const DEFAULT_COMPARISON_K: usize = 6;
pub const DEFAULT_COMPARISON_THRESHOLD: f64 = 0.3;
pub const DEFAULT_OPTIMIZE_QUERY: bool = false;
pub const DEFAULT_BALANCE_COMPARISONS: bool = true;
pub const DEFAULT_PLANNER_STEP_BUDGET: usize = 3;

// --- Generation ---
pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 2_000;

// --- Validation ---
pub const DEFAULT_PASS_THRESHOLD: f64 = 0.65;
pub const DEFAULT_MIN_ALIGNMENT: f64 = 0.60;
pub const DEFAULT_MIN_GROUNDEDNESS: f64 = 0.70;
pub const DEFAULT_REQUIRE_CITATIONS: bool = true;
pub const DEFAULT_WEIGHT_COHERENCE: f64 = 0.20;
pub const DEFAULT_WEIGHT_ALIGNMENT: f64 = 0.30;
pub const DEFAULT_WEIGHT_GROUNDEDNESS: f64 = 0.25;
pub const DEFAULT_WEIGHT_COMPLETENESS: f64 = 0.15;
pub const DEFAULT_WEIGHT_CITATION: f64 = 0.10;

// --- Pipeline ---
pub const DEFAULT_MAX_REGENERATION_ATTEMPTS: u32 = 2;
pub const DEFAULT_PERSIST_TRACES: bool = false;
pub const DEFAULT_TRACE_DIR: &str = "traces";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
