//! Scan orchestrator.
//!
//! Selects the strictness tier for a request, loads the page through the
//! matching provider, drives frame traversal and assembles the report.
//! Provider failures degrade to an empty report; they never reach the caller
//! as errors.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use fieldguard_protocols::{
    DocumentProvider, FetchRequest, InputError, ProviderError, ScanLevel, ScanReport, Strictness,
};

use crate::enumerator::{EnumerationOptions, ExplicitHiddenPolicy};
use crate::risk::{RiskAggregator, RiskThresholds};
use crate::selector::DEFAULT_SELECTOR_MAX_LEN;
use crate::traversal::{FrameTraversal, TraversalOutcome, DEFAULT_FRAME_TIMEOUT};

/// Engine tuning shared by every scan of an orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub policy: ExplicitHiddenPolicy,
    pub selector_max_len: usize,
    pub thresholds: RiskThresholds,
    pub page_timeout: Duration,
    pub frame_timeout: Duration,
    pub settle_medium: Duration,
    pub settle_advanced: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            policy: ExplicitHiddenPolicy::default(),
            selector_max_len: DEFAULT_SELECTOR_MAX_LEN,
            thresholds: RiskThresholds::default(),
            page_timeout: Duration::from_secs(30),
            frame_timeout: DEFAULT_FRAME_TIMEOUT,
            settle_medium: Duration::from_millis(1500),
            settle_advanced: Duration::from_millis(3000),
        }
    }
}

impl ScanOptions {
    /// Settle delay granted to dynamic content for `level`.
    pub fn settle_for(&self, level: ScanLevel) -> Duration {
        match level {
            ScanLevel::Simple => Duration::ZERO,
            ScanLevel::Medium => self.settle_medium,
            ScanLevel::Advanced => self.settle_advanced,
        }
    }
}

/// A validated scan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub url: Url,
    pub level: ScanLevel,
    /// Overrides [`ScanOptions::policy`] for this request.
    pub policy: Option<ExplicitHiddenPolicy>,
}

impl ScanRequest {
    pub fn new(url: Url, level: ScanLevel) -> Self {
        Self {
            url,
            level,
            policy: None,
        }
    }

    /// Validate raw caller input. Only absolute `http`/`https` URLs are accepted.
    pub fn parse(url: &str, level: &str) -> Result<Self, InputError> {
        let url = Url::parse(url.trim()).map_err(|e| InputError::InvalidUrl(format!("{}: {}", url, e)))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(InputError::UnsupportedScheme(other.to_string())),
        }
        let level = level.parse::<ScanLevel>()?;
        Ok(Self::new(url, level))
    }

    pub fn with_policy(mut self, policy: ExplicitHiddenPolicy) -> Self {
        self.policy = Some(policy);
        self
    }
}

pub struct ScanOrchestrator {
    static_provider: Arc<dyn DocumentProvider>,
    rendered_provider: Arc<dyn DocumentProvider>,
    options: ScanOptions,
    aggregator: RiskAggregator,
}

impl ScanOrchestrator {
    pub fn new(
        static_provider: Arc<dyn DocumentProvider>,
        rendered_provider: Arc<dyn DocumentProvider>,
        options: ScanOptions,
    ) -> Self {
        let aggregator = RiskAggregator::new(options.thresholds);
        Self {
            static_provider,
            rendered_provider,
            options,
            aggregator,
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    fn provider_for(&self, strictness: Strictness) -> &Arc<dyn DocumentProvider> {
        match strictness {
            Strictness::Static => &self.static_provider,
            Strictness::Rendered => &self.rendered_provider,
        }
    }

    /// Run one scan to completion. Always yields a well-formed report.
    pub async fn scan(&self, request: &ScanRequest) -> ScanReport {
        let started = Instant::now();
        let scan_id = Uuid::new_v4();
        let scanned_at = Utc::now();
        let strictness = request.level.strictness();
        let provider = self.provider_for(strictness);

        info!(
            scan_id = %scan_id,
            url = %request.url,
            level = %request.level,
            provider = provider.name(),
            "Scan started"
        );

        let outcome = match self.load_and_traverse(provider.as_ref(), request).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(scan_id = %scan_id, url = %request.url, error = %e, "Page could not be loaded");
                None
            }
        };

        let report = match outcome {
            Some(outcome) => ScanReport {
                scan_id,
                url: request.url.to_string(),
                level: request.level,
                scanned_at,
                risk: self.aggregator.assess(outcome.findings.len()),
                findings: outcome.findings,
                frames_scanned: outcome.frames_scanned,
                frames_failed: outcome.frames_failed,
                degraded: false,
            },
            None => ScanReport {
                scan_id,
                url: request.url.to_string(),
                level: request.level,
                scanned_at,
                findings: Vec::new(),
                risk: RiskAggregator::degraded(),
                frames_scanned: 0,
                frames_failed: 0,
                degraded: true,
            },
        };

        info!(
            scan_id = %scan_id,
            findings = report.findings.len(),
            risk = ?report.risk.level,
            degraded = report.degraded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scan finished"
        );
        report
    }

    async fn load_and_traverse(
        &self,
        provider: &dyn DocumentProvider,
        request: &ScanRequest,
    ) -> Result<TraversalOutcome, ProviderError> {
        let strictness = request.level.strictness();
        let settle = self.options.settle_for(request.level);
        let fetch = FetchRequest::new(request.url.clone(), strictness)
            .with_settle(settle)
            .with_timeout(self.options.page_timeout);

        let deadline = self.options.page_timeout + settle;
        let page = tokio::time::timeout(deadline, provider.fetch(&fetch))
            .await
            .map_err(|_| ProviderError::Timeout(deadline.as_millis() as u64))??;

        let options = EnumerationOptions::new(strictness)
            .with_policy(request.policy.unwrap_or(self.options.policy))
            .with_selector_max_len(self.options.selector_max_len);
        let traversal = FrameTraversal::new(options).with_frame_timeout(self.options.frame_timeout);

        let outcome = traversal
            .traverse(page.as_ref(), request.level.follows_frames())
            .await;
        page.close().await;
        Ok(outcome)
    }
}
