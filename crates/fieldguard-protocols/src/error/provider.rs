//! Document provider errors.

use thiserror::Error;

/// Page-level failures reported by a [`DocumentProvider`](crate::DocumentProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Page unreachable: {0}")]
    Unreachable(String),

    #[error("Render timed out after {0} ms")]
    Timeout(u64),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Document provider unavailable: {0}")]
    Unavailable(String),
}
