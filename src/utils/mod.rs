//! Utility modules shared by the client and the renderers.
//!
//! - [`truncate`]: cut text to a character budget with a trailing `"..."`
//! - [`DisplayBudget`]: a validated, non-negative budget
//! - [`HttpClient`]: shared reqwest client with timeouts and user agent
//!
//! # Truncation
//!
//! ```rust
//! use paper_search::utils::{checked_truncate, truncate};
//!
//! assert_eq!(truncate("abcdefghij", 5), "ab...");
//! assert!(checked_truncate("abc", -1).is_err());
//! ```

mod http;
mod truncate;

pub use http::{HttpClient, DEFAULT_USER_AGENT};
pub use truncate::{checked_truncate, truncate, DisplayBudget, TruncateError, TRUNCATION_MARKER};
