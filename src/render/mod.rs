//! Turning search results into something on screen.
//!
//! - [`Projector`]: maps [`SearchResult`](crate::models::SearchResult) records to
//!   [`DisplayResult`](crate::models::DisplayResult) records, truncating the author
//!   and snippet lines to their display budgets
//! - [`ResultSink`]: renderers consuming display results ([`ListSink`],
//!   [`TableSink`], [`JsonSink`])
//!
//! ```rust
//! use paper_search::models::SearchResult;
//! use paper_search::render::project;
//!
//! let result = SearchResult::new("T", "J", 2020, "short").authors(["A", "B"]);
//! let display = project(&result);
//! assert_eq!(display.title_line(), "T - J (2020)");
//! assert_eq!(display.author_line(), Some("A,B"));
//! ```

mod project;
mod sink;

pub use project::{project, ProjectionMode, Projector, AUTHOR_SEPARATOR};
pub use sink::{JsonSink, ListSink, ResultSink, TableSink, CLEAR_SCREEN};
