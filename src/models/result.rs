//! Search result records as returned by the search API.

use serde::{Deserialize, Serialize};

/// One element of the search API response array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Paper title
    pub title: String,

    /// Authors, in the order the API lists them
    pub authors: Vec<String>,

    /// Title of the journal the paper appeared in
    pub journal_title: String,

    /// Publication year
    pub year: i32,

    /// Abstract or summary text
    pub snippet: String,
}

impl SearchResult {
    /// Create a new result with required fields and no authors
    pub fn new(
        title: impl Into<String>,
        journal_title: impl Into<String>,
        year: i32,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            journal_title: journal_title.into(),
            year,
            snippet: snippet.into(),
        }
    }

    /// Set the author list
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }
}

/// Errors raised while decoding a search API payload.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The top-level JSON value was not an array
    #[error("Expected a JSON array of results, got {0}")]
    NotAnArray(&'static str),

    /// A result record lacks a required field (absent or null)
    #[error("Result {index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// Malformed JSON or a field of the wrong type
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wire shape with every field optional, so absence can be reported by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResult {
    title: Option<String>,
    authors: Option<Vec<String>>,
    journal_title: Option<String>,
    year: Option<i32>,
    snippet: Option<String>,
}

impl RawResult {
    fn validate(self, index: usize) -> Result<SearchResult, DecodeError> {
        let missing = |field| DecodeError::MissingField { index, field };

        Ok(SearchResult {
            title: self.title.ok_or_else(|| missing("title"))?,
            authors: self.authors.ok_or_else(|| missing("authors"))?,
            journal_title: self.journal_title.ok_or_else(|| missing("journalTitle"))?,
            year: self.year.ok_or_else(|| missing("year"))?,
            snippet: self.snippet.ok_or_else(|| missing("snippet"))?,
        })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Decode a search API response body into typed results.
///
/// The body must be a JSON array. Each element must carry every
/// [`SearchResult`] field; the first absent or `null` field is reported as
/// [`DecodeError::MissingField`] with the element's index.
pub fn decode_results(body: &str) -> Result<Vec<SearchResult>, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    decode_value(value)
}

/// Decode an already-parsed JSON value into typed results.
pub fn decode_value(value: serde_json::Value) -> Result<Vec<SearchResult>, DecodeError> {
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => return Err(DecodeError::NotAnArray(json_kind(&other))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let raw: RawResult = serde_json::from_value(item)?;
            raw.validate(index)
        })
        .collect()
}
