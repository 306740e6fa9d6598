//! Scan engine configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Engine tuning applied to every scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Report `<input type="hidden">` fields. `false` selects suspicious-only reporting.
    #[serde(default = "default_true")]
    pub report_explicit_hidden: bool,

    /// Upper bound on reported selector length, in characters.
    #[serde(default = "default_selector_max_len")]
    pub selector_max_len: usize,

    /// Per-frame evaluation timeout.
    #[serde(default = "default_frame_timeout_ms")]
    pub frame_timeout_ms: u64,

    /// Page load timeout.
    #[serde(default = "default_page_timeout_ms")]
    pub page_timeout_ms: u64,

    /// Settle delay for `medium` scans.
    #[serde(default = "default_settle_medium_ms")]
    pub settle_medium_ms: u64,

    /// Settle delay for `advanced` scans.
    #[serde(default = "default_settle_advanced_ms")]
    pub settle_advanced_ms: u64,

    #[serde(default)]
    pub risk: RiskConfig,
}

fn default_selector_max_len() -> usize {
    120
}

fn default_frame_timeout_ms() -> u64 {
    10_000
}

fn default_page_timeout_ms() -> u64 {
    30_000
}

fn default_settle_medium_ms() -> u64 {
    1_500
}

fn default_settle_advanced_ms() -> u64 {
    3_000
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            report_explicit_hidden: default_true(),
            selector_max_len: default_selector_max_len(),
            frame_timeout_ms: default_frame_timeout_ms(),
            page_timeout_ms: default_page_timeout_ms(),
            settle_medium_ms: default_settle_medium_ms(),
            settle_advanced_ms: default_settle_advanced_ms(),
            risk: RiskConfig::default(),
        }
    }
}

/// Finding counts at which the risk level steps up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    #[serde(default = "default_medium_at")]
    pub medium_at: usize,

    #[serde(default = "default_high_at")]
    pub high_at: usize,
}

fn default_medium_at() -> usize {
    3
}

fn default_high_at() -> usize {
    7
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            medium_at: default_medium_at(),
            high_at: default_high_at(),
        }
    }
}
