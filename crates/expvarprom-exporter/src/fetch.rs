//! Upstream fetch collaborator.
//!
//! The registry only needs "bytes for this url, within this deadline"; the
//! trait keeps reqwest out of the tests.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use expvarprom_core::error::ExporterError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl From<FetchError> for ExporterError {
    fn from(e: FetchError) -> Self {
        ExporterError::Fetch(e.to_string())
    }
}

#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Bytes, FetchError>;
}

/// reqwest-backed fetcher. One client (connection pool) shared by all sources.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<Bytes, FetchError> {
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    timeout,
                }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    source: e,
                }
            }
        };

        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.bytes().await.map_err(classify)
    }
}
