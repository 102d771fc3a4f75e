//! Domain list sources
//!
//! The config endpoint answers `GET` with `{ "domains": ["..."] }`.

use std::future::Future;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Error type for a single endpoint fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Malformed domain list from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("No config endpoints configured")]
    NoEndpoints,
}

/// Body of the config endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainListResponse {
    pub domains: Vec<String>,
}

/// Something that can produce the always-allowed list for one endpoint URL.
pub trait DomainSource: Send + Sync {
    fn fetch_domains(&self, url: &str) -> impl Future<Output = Result<Vec<String>, FetchError>> + Send;
}

/// [`DomainSource`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpDomainSource {
    client: Client,
}

impl HttpDomainSource {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl DomainSource for HttpDomainSource {
    async fn fetch_domains(&self, url: &str) -> Result<Vec<String>, FetchError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let parsed: DomainListResponse = serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })?;

        Ok(parsed.domains)
    }
}
