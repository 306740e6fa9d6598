//! Scan API handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use fieldguard_core::{ExplicitHiddenPolicy, ScanRequest};
use fieldguard_protocols::{FieldFinding, RiskLevel, ScanLevel, ScanReport};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /scan`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequestBody {
    pub url: String,
    pub level: String,
    /// Overrides the configured policy for `type="hidden"` inputs.
    #[serde(default)]
    pub report_explicit_hidden: Option<bool>,
}

/// Wire shape of a scan report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub scan_id: Uuid,
    pub url: String,
    pub scan_level: ScanLevel,
    pub scanned_at: DateTime<Utc>,
    pub hidden_fields: Vec<FieldFinding>,
    pub metadata: ScanMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetadata {
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub frames_scanned: usize,
    pub frames_failed: usize,
    pub degraded: bool,
}

impl From<ScanReport> for ScanResponse {
    fn from(report: ScanReport) -> Self {
        Self {
            scan_id: report.scan_id,
            url: report.url,
            scan_level: report.level,
            scanned_at: report.scanned_at,
            hidden_fields: report.findings,
            metadata: ScanMetadata {
                risk_level: report.risk.level,
                recommendations: report.risk.recommendations,
                frames_scanned: report.frames_scanned,
                frames_failed: report.frames_failed,
                degraded: report.degraded,
            },
        }
    }
}

impl ScanRequestBody {
    pub fn into_request(self) -> Result<ScanRequest, ApiError> {
        let request = ScanRequest::parse(&self.url, &self.level)?;
        Ok(match self.report_explicit_hidden {
            Some(report) => request.with_policy(ExplicitHiddenPolicy::from_report_flag(report)),
            None => request,
        })
    }
}

/// Run a scan.
///
/// POST /scan
pub async fn scan(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScanRequestBody>, JsonRejection>,
) -> Result<Json<ScanResponse>, ApiError> {
    let Json(body) = payload?;
    let request = body.into_request()?;
    info!(url = %request.url, level = request.level.as_str(), "Scan requested");

    // Each scan runs in its own task so a panic surfaces as a JoinError.
    let orchestrator = state.orchestrator.clone();
    let report = tokio::spawn(async move { orchestrator.scan(&request).await })
        .await
        .map_err(|e| {
            error!(error = %e, "Scan task failed");
            ApiError::Internal(e.to_string())
        })?;

    state.record_scan();
    Ok(Json(ScanResponse::from(report)))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
