//! Character-budget truncation for display fields.
//!
//! Lengths are counted in Unicode scalar values, so a budget of 10 means ten
//! `char`s regardless of how many bytes they take in UTF-8.

use serde::{Deserialize, Serialize};

/// Marker appended to a field that was cut to fit its budget.
pub const TRUNCATION_MARKER: &str = "...";

const MARKER_CHARS: usize = 3;

/// Errors raised when a truncation budget is not usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TruncateError {
    /// The budget was negative
    #[error("Invalid argument: display budget must be >= 0, got {0}")]
    InvalidArgument(i64),
}

/// Truncate `text` so it is at most `max_chars` characters long.
///
/// Text that already fits is returned unchanged. Longer text keeps its first
/// `max_chars - 3` characters followed by [`TRUNCATION_MARKER`]. Budgets
/// smaller than the marker yield a prefix of the marker itself.
///
/// # Examples
///
/// ```
/// use paper_search::utils::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("abcdefghij", 5), "ab...");
/// assert_eq!(truncate("abcdefghij", 2), "..");
/// ```
pub fn truncate(text: &str, max_chars: usize) -> String {
    // Find the byte offset of the (max_chars + 1)th char; if there is none,
    // the text fits.
    if text.char_indices().nth(max_chars).is_none() {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(MARKER_CHARS);
    if keep == 0 {
        return TRUNCATION_MARKER[..max_chars.min(MARKER_CHARS)].to_string();
    }

    let cut = text
        .char_indices()
        .nth(keep)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    format!("{}{}", &text[..cut], TRUNCATION_MARKER)
}

/// Truncate with a signed budget, rejecting negative values.
pub fn checked_truncate(text: &str, max_chars: i64) -> Result<String, TruncateError> {
    let budget = DisplayBudget::try_from(max_chars)?;
    Ok(budget.apply(text))
}

/// A validated, non-negative character budget for one display field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct DisplayBudget(usize);

impl DisplayBudget {
    /// Budget used for the comma-joined author list
    pub const AUTHORS: DisplayBudget = DisplayBudget(100);

    /// Budget used for the abstract/snippet body
    pub const SNIPPET: DisplayBudget = DisplayBudget(250);

    /// Create a budget from an unsigned character count
    pub const fn new(max_chars: usize) -> Self {
        Self(max_chars)
    }

    /// Number of characters allowed
    pub fn get(self) -> usize {
        self.0
    }

    /// Truncate `text` to this budget
    pub fn apply(self, text: &str) -> String {
        truncate(text, self.0)
    }
}

impl TryFrom<i64> for DisplayBudget {
    type Error = TruncateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .map(DisplayBudget)
            .map_err(|_| TruncateError::InvalidArgument(value))
    }
}

impl From<DisplayBudget> for i64 {
    fn from(budget: DisplayBudget) -> Self {
        i64::try_from(budget.0).unwrap_or(i64::MAX)
    }
}

impl std::fmt::Display for DisplayBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DisplayBudget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|e| format!("not an integer: {}", e))?;
        DisplayBudget::try_from(value).map_err(|e| e.to_string())
    }
}
