//! HTTP route definitions.
//!
//! ```text
//! POST /scan    - Run a scan and return the report
//! GET  /health  - Version, uptime and scan counter
//! GET  /livez   - Liveness probe
//! ```

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::monitoring;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let scan_routes = Router::new()
        .route("/scan", post(handlers::scan))
        .route("/health", get(monitoring::health_check))
        .with_state(state);

    // Liveness probe has no state dependency
    let liveness_route = Router::new().route("/livez", get(monitoring::liveness_probe));

    Router::new()
        .merge(scan_routes)
        .merge(liveness_route)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
