use std::fmt;

use serde::{Deserialize, Serialize};

/// The four query intents that drive routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Looking up specific information.
    Search,
    /// Asking for a synthesis of a topic.
    Summary,
    /// Contrasting two or more concepts.
    Comparison,
    /// Conversation that needs no documents.
    General,
}

impl Intent {
    /// Total number of intents.
    pub const COUNT: usize = 4;

    /// All variants for iteration.
    pub const ALL: [Intent; 4] = [
        Self::Search,
        Self::Summary,
        Self::Comparison,
        Self::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Summary => "summary",
            Self::Comparison => "comparison",
            Self::General => "general",
        }
    }

    /// Parse a label produced by a model. Accepts the English names and the
    /// Spanish labels used by older prompts. Returns `None` for anything else.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "search" | "busqueda" | "búsqueda" => Some(Self::Search),
            "summary" | "resumen" => Some(Self::Summary),
            "comparison" | "comparacion" | "comparación" => Some(Self::Comparison),
            "general" => Some(Self::General),
            _ => None,
        }
    }

    /// Whether this intent normally needs retrieved documents.
    pub fn needs_documents(&self) -> bool {
        !matches!(self, Self::General)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
