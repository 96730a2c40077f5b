//! Projection from raw search results to display fields.

use serde::{Deserialize, Serialize};

use crate::models::{DisplayResult, SearchResult};
use crate::utils::DisplayBudget;

/// Separator used when joining the author list.
pub const AUTHOR_SEPARATOR: &str = ",";

/// Which display fields a projection produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Title line, author line and snippet line
    #[default]
    Full,
    /// The title alone
    TitleOnly,
}

/// Maps [`SearchResult`] records to [`DisplayResult`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projector {
    mode: ProjectionMode,
    author_budget: DisplayBudget,
    snippet_budget: DisplayBudget,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Full,
            author_budget: DisplayBudget::AUTHORS,
            snippet_budget: DisplayBudget::SNIPPET,
        }
    }
}

impl Projector {
    /// Create a projector with default budgets
    pub fn new(mode: ProjectionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set the author line budget
    pub fn author_budget(mut self, budget: DisplayBudget) -> Self {
        self.author_budget = budget;
        self
    }

    /// Set the snippet line budget
    pub fn snippet_budget(mut self, budget: DisplayBudget) -> Self {
        self.snippet_budget = budget;
        self
    }

    /// The configured mode
    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Project a single record
    pub fn project(&self, result: &SearchResult) -> DisplayResult {
        match self.mode {
            ProjectionMode::TitleOnly => DisplayResult::TitleOnly {
                title: result.title.clone(),
            },
            ProjectionMode::Full => DisplayResult::Full {
                title_line: format!(
                    "{} - {} ({})",
                    result.title, result.journal_title, result.year
                ),
                author_line: self
                    .author_budget
                    .apply(&result.authors.join(AUTHOR_SEPARATOR)),
                snippet_line: self.snippet_budget.apply(&result.snippet),
            },
        }
    }

    /// Project every record, preserving order
    pub fn project_all(&self, results: &[SearchResult]) -> Vec<DisplayResult> {
        results.iter().map(|r| self.project(r)).collect()
    }
}

/// Project a record with the default full layout and budgets.
pub fn project(result: &SearchResult) -> DisplayResult {
    Projector::default().project(result)
}
