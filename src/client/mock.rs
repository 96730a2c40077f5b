//! Mock search API for testing and offline runs.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use crate::client::{ClientError, SearchApi};
use crate::models::SearchResult;

/// A mock API that returns predefined results and records every query.
#[derive(Debug, Default)]
pub struct MockSearchApi {
    results: Mutex<Option<Vec<SearchResult>>>,
    fail_with_status: Mutex<Option<u16>>,
    queries: Mutex<Vec<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockSearchApi {
    /// Create a new mock that answers every query with an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock preloaded with results.
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        let mock = Self::new();
        mock.set_results(results);
        mock
    }

    /// Set the results to return.
    pub fn set_results(&self, results: Vec<SearchResult>) {
        *lock(&self.results) = Some(results);
    }

    /// Make every following search fail with the given HTTP status.
    pub fn fail_with_status(&self, status: u16) {
        *lock(&self.fail_with_status) = Some(status);
    }

    /// Clear configured results and failures.
    pub fn reset(&self) {
        *lock(&self.results) = None;
        *lock(&self.fail_with_status) = None;
    }

    /// Queries received so far, oldest first.
    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }
}

#[async_trait]
impl SearchApi for MockSearchApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ClientError> {
        lock(&self.queries).push(query.to_string());

        if let Some(status) = *lock(&self.fail_with_status) {
            return Err(ClientError::Status(status));
        }

        Ok(lock(&self.results).clone().unwrap_or_default())
    }
}

/// Helper to build a result for tests.
pub fn make_result(title: &str, authors: &[&str], year: i32) -> SearchResult {
    SearchResult::new(title, "Journal of Tests", year, format!("About {}", title))
        .authors(authors.iter().copied())
}
