use std::fmt;
use std::future::Future;

use serde_json::Value;

use crate::config::RegistryConfig;

/// Parameters for one canton's registry search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionQuery {
    pub canton: String,
    /// Earliest registration date of interest, `YYYY-MM-DD`.
    pub registered_from: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("registry returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed registry payload: {0}")]
    MalformedPayload(String),
}

/// Source of raw registry search results.
///
/// The payload is returned as an untyped JSON document; only the fields the
/// extraction needs are decoded downstream.
pub trait RegistryClient: Send + Sync {
    fn search_region(
        &self,
        query: &RegionQuery,
    ) -> impl Future<Output = Result<Value, RegistryError>> + Send;
}

/// HTTP client for the public ZEFIX search endpoint.
pub struct ZefixHttpClient {
    client: reqwest::Client,
    search_url: String,
    page_size: u32,
}

impl ZefixHttpClient {
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            page_size: config.page_size,
        })
    }
}

impl fmt::Debug for ZefixHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZefixHttpClient")
            .field("search_url", &self.search_url)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl RegistryClient for ZefixHttpClient {
    async fn search_region(&self, query: &RegionQuery) -> Result<Value, RegistryError> {
        let page_size = self.page_size.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("canton", query.canton.as_str()),
                ("activeOnly", "true"),
                ("registrationDateFrom", query.registered_from.as_str()),
                ("page", "0"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|err| RegistryError::MalformedPayload(err.to_string()))
    }
}
