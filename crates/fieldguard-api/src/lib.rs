//! # fieldguard API
//!
//! HTTP boundary for the scanner. Requests are validated into
//! [`fieldguard_core::ScanRequest`]s, each scan runs in its own task, and the
//! resulting report is returned as JSON.

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::handlers::{ScanMetadata, ScanRequestBody, ScanResponse};
pub use http::routes::create_router;
pub use server::{InterfaceConfig, InterfaceServer};
pub use state::AppState;
