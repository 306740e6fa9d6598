//! Per-frame evaluation errors.

use thiserror::Error;

/// A failure confined to a single frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("Frame evaluation timed out after {0} ms")]
    Timeout(u64),

    #[error("Frame access denied: {0}")]
    AccessDenied(String),

    #[error("Frame detached: {0}")]
    Detached(String),

    #[error("Frame evaluation failed: {0}")]
    Evaluation(String),
}
