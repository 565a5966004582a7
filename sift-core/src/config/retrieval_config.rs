use serde::{Deserialize, Serialize};

use super::defaults;
use crate::intent::Intent;

/// Result count and minimum relevance for one intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchProfile {
    pub k: usize,
    pub score_threshold: f64,
}

/// Retrieval strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMode {
    /// Deterministic intent-sized search.
    Direct,
    /// Model-chosen actions from a closed capability set, step-bounded.
    Planned,
}

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub search: SearchProfile,
    pub summary: SearchProfile,
    pub comparison: SearchProfile,
    pub mode: RetrievalMode,
    /// Rewrite the query with the model before searching.
    pub optimize_query: bool,
    /// Search each compared concept separately and interleave results.
    pub balance_comparisons: bool,
    /// Maximum planner actions per retrieve call.
    pub planner_step_budget: usize,
}

impl RetrievalConfig {
    /// Search profile for an intent. `General` shares the search profile.
    pub fn profile(&self, intent: Intent) -> SearchProfile {
        match intent {
            Intent::Search | Intent::General => self.search,
            Intent::Summary => self.summary,
            Intent::Comparison => self.comparison,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            search: SearchProfile {
                k: defaults::DEFAULT_SEARCH_K,
                score_threshold: defaults::DEFAULT_SEARCH_THRESHOLD,
            },
            summary: SearchProfile {
                k: defaults::DEFAULT_SUMMARY_K,
                score_threshold: defaults::DEFAULT_SUMMARY_THRESHOLD,
            },
            comparison: SearchProfile {
                k: defaults::DEFAULT_COMPARISON_K,
                score_threshold: defaults::DEFAULT_COMPARISON_THRESHOLD,
            },
            mode: RetrievalMode::Direct,
            optimize_query: defaults::DEFAULT_OPTIMIZE_QUERY,
            balance_comparisons: defaults::DEFAULT_BALANCE_COMPARISONS,
            planner_step_budget: defaults::DEFAULT_PLANNER_STEP_BUDGET,
        }
    }
}
