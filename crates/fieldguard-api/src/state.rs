//! Application state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use fieldguard_core::ScanOrchestrator;

/// Application state shared across handlers.
pub struct AppState {
    pub orchestrator: Arc<ScanOrchestrator>,
    start_time: Instant,
    scans_completed: AtomicU64,
}

impl AppState {
    pub fn new(orchestrator: Arc<ScanOrchestrator>) -> Self {
        Self {
            orchestrator,
            start_time: Instant::now(),
            scans_completed: AtomicU64::new(0),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn record_scan(&self) {
        self.scans_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn scans_completed(&self) -> u64 {
        self.scans_completed.load(Ordering::Relaxed)
    }
}
