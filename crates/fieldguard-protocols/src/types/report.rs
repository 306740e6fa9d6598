//! Scan levels, risk levels and the scan report.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::finding::FieldFinding;
use crate::error::InputError;

/// Evaluation mode of the visibility heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Markup-only: style and attribute signals.
    Static,
    /// Live layout: adds geometry and computed-style signals.
    Rendered,
}

/// Caller-facing scan level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanLevel {
    Simple,
    Medium,
    Advanced,
}

impl ScanLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Advanced => "advanced",
        }
    }

    pub fn strictness(&self) -> Strictness {
        match self {
            Self::Simple => Strictness::Static,
            Self::Medium | Self::Advanced => Strictness::Rendered,
        }
    }

    /// Whether nested frames are traversed at this level.
    pub fn follows_frames(&self) -> bool {
        self.strictness() == Strictness::Rendered
    }
}

impl FromStr for ScanLevel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "medium" => Ok(Self::Medium),
            "advanced" => Ok(Self::Advanced),
            _ => Err(InputError::UnsupportedLevel(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScanLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Low
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub recommendations: Vec<String>,
}

/// Final output of one scan invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub scan_id: Uuid,
    pub url: String,
    pub level: ScanLevel,
    pub scanned_at: DateTime<Utc>,
    /// Main-document findings first, then frames in discovery order.
    pub findings: Vec<FieldFinding>,
    pub risk: RiskAssessment,
    pub frames_scanned: usize,
    pub frames_failed: usize,
    /// Set when the page itself could not be loaded.
    pub degraded: bool,
}
