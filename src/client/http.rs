//! HTTP implementation of the search API.

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::client::{ClientError, SearchApi};
use crate::config::ApiConfig;
use crate::models::{decode_results, SearchResult};
use crate::utils::HttpClient;

/// Path prefix of the search endpoint; the encoded query is appended.
pub const SEARCH_PATH: &str = "/api/0.1/search/";

/// Search API reached over HTTP: `GET {base}/api/0.1/search/{query}`.
#[derive(Debug, Clone)]
pub struct HttpSearchApi {
    client: HttpClient,
    base_url: Url,
}

impl HttpSearchApi {
    /// Build a client from API settings
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = HttpClient::with_settings(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )?;

        Ok(Self { client, base_url })
    }

    /// Build from an existing client, e.g. to share a connection pool
    pub fn with_client(client: HttpClient, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// The URL a query is sent to
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            SEARCH_PATH,
            urlencoding::encode(query)
        )
    }
}

/// Parse a base URL that paths can be appended to (rejects `mailto:` etc.)
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ClientError> {
        let url = self.search_url(query);
        tracing::debug!(%url, "sending search request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("Failed to reach search API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let results = decode_results(&body)?;
        tracing::debug!(count = results.len(), "decoded search results");

        Ok(results)
    }
}
