//! Frame traversal controller.
//!
//! Runs enumeration over the main document and every frame of a loaded page.
//! Frames are evaluated concurrently, each under its own timeout, and the
//! results are merged only after every frame has settled: main page first,
//! then frames in discovery order. A failing frame contributes nothing.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use fieldguard_protocols::{FieldFinding, FrameError, FrameRef, LoadedPage, MAIN_PAGE_LOCATION};

use crate::enumerator::{enumerate_fields, EnumerationOptions};

/// Default per-frame evaluation timeout.
pub const DEFAULT_FRAME_TIMEOUT: Duration = Duration::from_secs(10);

/// Aggregated result of traversing one page.
#[derive(Debug, Clone, Default)]
pub struct TraversalOutcome {
    pub findings: Vec<FieldFinding>,
    /// Frames (excluding the main page) that were evaluated successfully.
    pub frames_scanned: usize,
    pub frames_failed: usize,
}

#[derive(Debug, Clone)]
pub struct FrameTraversal {
    options: EnumerationOptions,
    frame_timeout: Duration,
}

impl FrameTraversal {
    pub fn new(options: EnumerationOptions) -> Self {
        Self {
            options,
            frame_timeout: DEFAULT_FRAME_TIMEOUT,
        }
    }

    pub fn with_frame_timeout(mut self, timeout: Duration) -> Self {
        self.frame_timeout = timeout;
        self
    }

    pub async fn traverse(&self, page: &dyn LoadedPage, follow_frames: bool) -> TraversalOutcome {
        let mut outcome = TraversalOutcome {
            findings: enumerate_fields(page.document(), MAIN_PAGE_LOCATION, &self.options),
            ..Default::default()
        };
        if !follow_frames {
            return outcome;
        }

        let frames = match self.discover(page).await {
            Ok(frames) => frames,
            Err(e) => {
                warn!(error = %e, "Frame discovery failed, scanning main page only");
                return outcome;
            }
        };
        debug!(count = frames.len(), "Evaluating frames");

        let results = join_all(frames.iter().map(|frame| self.evaluate(page, frame))).await;

        for (frame, result) in frames.iter().zip(results) {
            let location = frame.location_tag();
            match result {
                Ok(findings) => {
                    outcome.frames_scanned += 1;
                    outcome.findings.extend(findings);
                }
                Err(e) => {
                    outcome.frames_failed += 1;
                    warn!(location = %location, error = %e, "Frame skipped");
                }
            }
        }
        outcome
    }

    async fn discover(&self, page: &dyn LoadedPage) -> Result<Vec<FrameRef>, FrameError> {
        tokio::time::timeout(self.frame_timeout, page.frames())
            .await
            .map_err(|_| FrameError::Timeout(self.timeout_ms()))?
    }

    async fn evaluate(
        &self,
        page: &dyn LoadedPage,
        frame: &FrameRef,
    ) -> Result<Vec<FieldFinding>, FrameError> {
        let doc = tokio::time::timeout(self.frame_timeout, page.evaluate_in_frame(frame))
            .await
            .map_err(|_| FrameError::Timeout(self.timeout_ms()))??;
        Ok(enumerate_fields(&doc, &frame.location_tag(), &self.options))
    }

    fn timeout_ms(&self) -> u64 {
        self.frame_timeout.as_millis() as u64
    }
}

#[cfg(test)]
#[path = "traversal_tests.rs"]
mod tests;
