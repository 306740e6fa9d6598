//! Document provider protocol.
//!
//! A provider turns a URL into a [`LoadedPage`]: the settled main document plus
//! access to its nested frames. Providers own every interaction with the page
//! (network, rendering, script evaluation); the engine only reads snapshots.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{FrameError, ProviderError};
use crate::types::{Document, FrameRef, Strictness};

/// Parameters of one page fetch.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: Url,
    pub strictness: Strictness,
    /// Delay granted to dynamic content after load, before snapshotting.
    pub settle: Duration,
    /// Upper bound for loading the page.
    pub timeout: Duration,
}

impl FetchRequest {
    pub fn new(url: Url, strictness: Strictness) -> Self {
        Self {
            url,
            strictness,
            settle: Duration::ZERO,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches pages for a strictness tier.
#[async_trait]
pub trait DocumentProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Load the page and return a handle to it.
    ///
    /// The returned page holds provider resources until [`LoadedPage::close`]
    /// is called.
    async fn fetch(&self, request: &FetchRequest) -> Result<Box<dyn LoadedPage>, ProviderError>;
}

/// A loaded page.
#[async_trait]
pub trait LoadedPage: Send + Sync {
    /// The settled main document.
    fn document(&self) -> &Document;

    /// Every nested frame of the page in discovery order, excluding the main frame.
    async fn frames(&self) -> Result<Vec<FrameRef>, FrameError>;

    /// Snapshot the document of one frame.
    async fn evaluate_in_frame(&self, frame: &FrameRef) -> Result<Document, FrameError>;

    /// Release provider resources. Must be safe to call on any page state.
    async fn close(&self);
}
