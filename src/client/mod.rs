//! Clients for the JSON search API.
//!
//! The [`SearchApi`] trait is the seam between the search box and the
//! network: [`HttpSearchApi`] talks to a real server, [`MockSearchApi`]
//! returns canned results.
//!
//! ```rust,no_run
//! use paper_search::client::{HttpSearchApi, SearchApi};
//! use paper_search::config::ApiConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpSearchApi::new(&ApiConfig::default())?;
//! let results = api.search("protein folding").await?;
//! println!("{} results", results.len());
//! # Ok(())
//! # }
//! ```

mod http;
pub mod mock;

pub use http::{HttpSearchApi, SEARCH_PATH};
pub use mock::MockSearchApi;

use async_trait::async_trait;

use crate::models::{DecodeError, SearchResult};

/// A source of search results for a free-text query.
#[async_trait]
pub trait SearchApi: Send + Sync + std::fmt::Debug {
    /// Run one search and return the decoded result list
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ClientError>;
}

#[async_trait]
impl<T: SearchApi + ?Sized> SearchApi for std::sync::Arc<T> {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ClientError> {
        (**self).search(query).await
    }
}

/// Errors that can occur when calling the search API
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured base URL could not be parsed
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("API returned status: {0}")]
    Status(u16),

    /// The response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}
