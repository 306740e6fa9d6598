//! Request validation errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported URL scheme: {0} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("Unsupported scan level: {0} (expected simple, medium or advanced)")]
    UnsupportedLevel(String),
}
