//! Which canned analysis a questions document asks for.

use serde::Serialize;
use std::fmt;

/// The analysis selected for a questions document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// Highest-grossing films table.
    Films,
    /// Indian high court judgement dataset.
    Court,
    /// Anything else.
    Unclassified,
}

impl AnalysisKind {
    /// Classifies `text` by substring.
    ///
    /// Films wins over court when both match.
    pub fn classify(text: &str) -> Self {
        if text.contains("Wikipedia") || text.contains("highest-grossing films") {
            Self::Films
        } else if text.to_lowercase().contains("court") || text.contains("DuckDB") {
            Self::Court
        } else {
            Self::Unclassified
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Films => "films",
            Self::Court => "court",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
