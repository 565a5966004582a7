//! Model-driven query rewriting.

use std::sync::Arc;

use sift_core::errors::LlmError;
use sift_core::models::Prompt;
use sift_core::traits::ILanguageModel;
use sift_core::{Intent, SiftResult};
use tracing::info;

const SYSTEM_PROMPT: &str = r#"You optimize queries for semantic document search.
Rewrite the user's query to retrieve more relevant documents:
1. Expand it with synonyms and related terms.
2. Drop filler words that carry no information.
3. Keep the original intent.

By intent:
- search: specific, precise terms
- summary: broader terms from the domain
- comparison: name every compared concept explicitly
- general: keep it simple

Example:
Query: "what about covid"
Optimized: covid-19 coronavirus symptoms treatment transmission effects

Reply with ONLY the optimized query, no explanation."#;

/// Rewrites a query into a better search key.
pub struct QueryOptimizer {
    model: Arc<dyn ILanguageModel>,
}

impl QueryOptimizer {
    pub fn new(model: Arc<dyn ILanguageModel>) -> Self {
        Self { model }
    }

    /// The rewritten query. Errors when the model fails or replies with nothing usable.
    pub fn optimize(&self, query: &str, intent: Intent) -> SiftResult<String> {
        let prompt = Prompt::new(SYSTEM_PROMPT, format!("Query: {query}\nIntent: {intent}"));
        let reply = self.model.invoke(&prompt)?;

        let optimized = clean_reply(&reply);
        if optimized.is_empty() {
            return Err(LlmError::MalformedOutput {
                reason: "optimizer returned an empty query".to_string(),
            }
            .into());
        }
        info!(original = %query, optimized = %optimized, "query optimized");
        Ok(optimized)
    }
}

/// First non-empty line, without an `Optimized:` label or surrounding quotes.
fn clean_reply(reply: &str) -> String {
    let line = reply
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();
    let line = line
        .strip_prefix("Optimized:")
        .or_else(|| line.strip_prefix("Optimized query:"))
        .unwrap_or(line);
    line.trim().trim_matches(|c: char| c == '"' || c == '\'' || c == '`').trim().to_string()
}
