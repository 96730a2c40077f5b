//! Display-ready records handed to a result sink.

use serde::{Deserialize, Serialize};

/// One rendered line group for a search result.
///
/// The `Full` shape carries the title line plus truncated author and snippet
/// lines. `TitleOnly` forwards the raw title and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayResult {
    #[serde(rename_all = "camelCase")]
    Full {
        title_line: String,
        author_line: String,
        snippet_line: String,
    },
    TitleOnly { title: String },
}

impl DisplayResult {
    /// The headline text, present in both shapes
    pub fn title_line(&self) -> &str {
        match self {
            DisplayResult::Full { title_line, .. } => title_line,
            DisplayResult::TitleOnly { title } => title,
        }
    }

    /// Truncated author line, if this is a full result
    pub fn author_line(&self) -> Option<&str> {
        match self {
            DisplayResult::Full { author_line, .. } => Some(author_line),
            DisplayResult::TitleOnly { .. } => None,
        }
    }

    /// Truncated snippet line, if this is a full result
    pub fn snippet_line(&self) -> Option<&str> {
        match self {
            DisplayResult::Full { snippet_line, .. } => Some(snippet_line),
            DisplayResult::TitleOnly { .. } => None,
        }
    }

    /// Whether the result carries author and snippet lines
    pub fn is_full(&self) -> bool {
        matches!(self, DisplayResult::Full { .. })
    }
}
