//! Plain HTTP page fetcher.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::{fetch_err, PageFetcher};

/// Fetches pages with a plain GET, a browser-like User-Agent, and a timeout.
///
/// Any non-200 status is a fetch failure; redirects are followed by the
/// underlying client before the status check.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.fetch_timeout)
            .build()
            .map_err(|e| Error::Config(format!("building HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Fetcher with explicit settings, mainly for tests.
    pub fn with_settings(user_agent: &str, timeout: Duration) -> Result<Self> {
        let config = Config {
            user_agent: user_agent.to_string(),
            fetch_timeout: timeout,
            ..Config::default()
        };
        Self::new(&config)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "http.fetch.start");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_err("HTTP request", e))?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "http.fetch.status");
        if status.as_u16() != 200 {
            return Err(Error::Fetch(format!("HTTP status {status} for {url}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_err("reading response body", e))?;
        info!(url, bytes = bytes.len(), "http.fetch.done");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn network_failure_is_fetch_error() {
        // Nothing listens on this port; the connection attempt fails fast.
        let fetcher =
            HttpFetcher::with_settings("test-agent", Duration::from_secs(2)).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/page").await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[tokio::test]
    async fn invalid_url_is_fetch_error() {
        let fetcher =
            HttpFetcher::with_settings("test-agent", Duration::from_secs(2)).unwrap();
        let err = fetcher.fetch("not-a-url").await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }
}
