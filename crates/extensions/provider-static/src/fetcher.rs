//! Bounded HTTP GET.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub user_agent: String,
    pub timeout: Duration,
    /// Bodies are truncated to this many bytes.
    pub max_body_bytes: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("fieldguard/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(20),
            max_body_bytes: 5 * 1024 * 1024,
        }
    }
}

/// A fetched response body.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    /// Final URL after redirects.
    pub url: Url,
    pub body: String,
    pub truncated: bool,
}

/// HTTP client shared by a provider and its pages.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// GET `url`, reading at most `max_body_bytes` of the body.
    pub async fn get(&self, url: &Url, timeout: Duration) -> Result<FetchedBody, FetchError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedUrl(url.to_string()));
        }
        let timeout = timeout.min(self.config.timeout);
        let timeout_ms = timeout.as_millis() as u64;

        let mut response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let final_url = response.url().clone();

        let mut bytes = Vec::new();
        let mut truncated = false;
        while let Some(chunk) = response.chunk().await.map_err(|e| classify(e, timeout_ms))? {
            let room = self.config.max_body_bytes.saturating_sub(bytes.len());
            if chunk.len() > room {
                bytes.extend_from_slice(&chunk[..room]);
                truncated = true;
                break;
            }
            bytes.extend_from_slice(&chunk);
        }

        debug!(url = %final_url, bytes = bytes.len(), truncated, "Fetched document");
        Ok(FetchedBody {
            url: final_url,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            truncated,
        })
    }
}

fn classify(err: reqwest::Error, timeout_ms: u64) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout_ms)
    } else {
        FetchError::Request(err)
    }
}
