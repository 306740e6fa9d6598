//! Risk aggregation.

use serde::{Deserialize, Serialize};

use fieldguard_protocols::{RiskAssessment, RiskLevel};

pub const REVIEW_HIDDEN_FIELDS: &str = "Review hidden fields for malicious autofill use";
pub const BLOCK_AUTOFILL: &str = "Block autofill on hidden/suspicious fields";
pub const NOTHING_DETECTED: &str = "No suspicious hidden fields detected";
pub const RECHECK_MANUALLY: &str = "Page could not be scanned; re-check manually";

/// Finding counts at which the risk level steps up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub medium_at: usize,
    pub high_at: usize,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium_at: 3,
            high_at: 7,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskAggregator {
    thresholds: RiskThresholds,
}

impl RiskAggregator {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    pub fn level_for(&self, findings: usize) -> RiskLevel {
        if findings >= self.thresholds.high_at {
            RiskLevel::High
        } else if findings >= self.thresholds.medium_at {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Assess a completed scan with `findings` hidden fields.
    pub fn assess(&self, findings: usize) -> RiskAssessment {
        let recommendations = if findings > 0 {
            vec![REVIEW_HIDDEN_FIELDS.to_string(), BLOCK_AUTOFILL.to_string()]
        } else {
            vec![NOTHING_DETECTED.to_string()]
        };
        RiskAssessment {
            level: self.level_for(findings),
            recommendations,
        }
    }

    /// Assessment for a page that could not be loaded.
    pub fn degraded() -> RiskAssessment {
        RiskAssessment {
            level: RiskLevel::Low,
            recommendations: vec![RECHECK_MANUALLY.to_string()],
        }
    }
}
