//! Static-tier [`DocumentProvider`].

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use fieldguard_protocols::{
    Document, DocumentProvider, FetchRequest, FrameError, FrameRef, LoadedPage, ProviderError,
};

use crate::error::FetchError;
use crate::fetcher::{Fetcher, FetcherConfig};
use crate::parser::parse_html;

/// Fetches raw markup over HTTP. No script runs and no layout is computed.
pub struct StaticProvider {
    fetcher: Fetcher,
}

impl StaticProvider {
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
        })
    }
}

#[async_trait]
impl DocumentProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<Box<dyn LoadedPage>, ProviderError> {
        let fetched = self.fetcher.get(&request.url, request.timeout).await?;
        if fetched.truncated {
            info!(
                url = %fetched.url,
                limit = self.fetcher.config().max_body_bytes,
                "Response body truncated"
            );
        }
        let document = parse_html(&fetched.body, &fetched.url);
        debug!(
            url = %fetched.url,
            elements = document.len(),
            frames = document.frames().len(),
            "Parsed static document"
        );
        Ok(Box::new(StaticPage::new(
            document,
            self.fetcher.clone(),
            request.timeout,
        )))
    }
}

/// A parsed page. Frames are fetched lazily on evaluation.
pub struct StaticPage {
    document: Document,
    fetcher: Fetcher,
    frame_timeout: Duration,
}

impl StaticPage {
    pub fn new(document: Document, fetcher: Fetcher, frame_timeout: Duration) -> Self {
        Self {
            document,
            fetcher,
            frame_timeout,
        }
    }
}

#[async_trait]
impl LoadedPage for StaticPage {
    fn document(&self) -> &Document {
        &self.document
    }

    async fn frames(&self) -> Result<Vec<FrameRef>, FrameError> {
        Ok(self.document.frames().to_vec())
    }

    async fn evaluate_in_frame(&self, frame: &FrameRef) -> Result<Document, FrameError> {
        let url = Url::parse(&frame.url).map_err(|e| FrameError::Evaluation(e.to_string()))?;
        let fetched = self.fetcher.get(&url, self.frame_timeout).await?;
        Ok(parse_html(&fetched.body, &fetched.url))
    }

    async fn close(&self) {}
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
