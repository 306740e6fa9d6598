//! CDP error types.

use thiserror::Error;

use fieldguard_protocols::{FrameError, ProviderError};

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chrome.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Chrome not found or not running with remote debugging.
    #[error("Chrome not available at {0}")]
    ChromeNotAvailable(String),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol error.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Navigation failed.
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// JavaScript execution error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("{method} timed out after {ms} ms")]
    Timeout { method: String, ms: u64 },

    /// Session closed.
    #[error("Session closed")]
    SessionClosed,

    /// Invalid response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CdpError {
    /// Protocol errors Chrome returns once a frame or its context is gone.
    fn is_detached(&self) -> bool {
        match self {
            CdpError::Protocol { message, .. } => {
                let message = message.to_ascii_lowercase();
                message.contains("no frame")
                    || message.contains("cannot find context")
                    || message.contains("execution context was destroyed")
            }
            CdpError::SessionClosed => true,
            _ => false,
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<CdpError> for ProviderError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ConnectionFailed(_)
            | CdpError::ChromeNotAvailable(_)
            | CdpError::WebSocket(_)
            | CdpError::Http(_)
            | CdpError::SessionClosed => ProviderError::Unavailable(e.to_string()),
            CdpError::NavigationFailed(msg) => ProviderError::Unreachable(msg),
            CdpError::Timeout { ms, .. } => ProviderError::Timeout(ms),
            _ => ProviderError::Render(e.to_string()),
        }
    }
}

impl From<CdpError> for FrameError {
    fn from(e: CdpError) -> Self {
        if e.is_detached() {
            return FrameError::Detached(e.to_string());
        }
        match e {
            CdpError::Timeout { ms, .. } => FrameError::Timeout(ms),
            CdpError::Protocol { ref message, .. }
                if message.to_ascii_lowercase().contains("cross-origin") =>
            {
                FrameError::AccessDenied(e.to_string())
            }
            _ => FrameError::Evaluation(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protocol(message: &str) -> CdpError {
        CdpError::Protocol {
            code: -32000,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_timeout_display() {
        let err = CdpError::Timeout {
            method: "Runtime.evaluate".to_string(),
            ms: 30000,
        };
        assert_eq!(err.to_string(), "Runtime.evaluate timed out after 30000 ms");
    }

    #[test]
    fn test_provider_error_mapping() {
        assert!(matches!(
            ProviderError::from(CdpError::ChromeNotAvailable("http://127.0.0.1:9222".into())),
            ProviderError::Unavailable(_)
        ));
        assert_eq!(
            ProviderError::from(CdpError::NavigationFailed("net::ERR_NAME_NOT_RESOLVED".into())),
            ProviderError::Unreachable("net::ERR_NAME_NOT_RESOLVED".to_string())
        );
        assert_eq!(
            ProviderError::from(CdpError::Timeout {
                method: "Page.navigate".into(),
                ms: 500
            }),
            ProviderError::Timeout(500)
        );
        assert!(matches!(
            ProviderError::from(CdpError::JavaScript("boom".into())),
            ProviderError::Render(_)
        ));
    }

    #[test]
    fn test_frame_error_mapping() {
        assert!(matches!(
            FrameError::from(protocol("No frame for given id found")),
            FrameError::Detached(_)
        ));
        assert!(matches!(
            FrameError::from(protocol("Cannot find context with specified id")),
            FrameError::Detached(_)
        ));
        assert!(matches!(
            FrameError::from(CdpError::SessionClosed),
            FrameError::Detached(_)
        ));
        assert!(matches!(
            FrameError::from(protocol("Blocked a frame with origin from accessing a cross-origin frame")),
            FrameError::AccessDenied(_)
        ));
        assert_eq!(
            FrameError::from(CdpError::Timeout {
                method: "Runtime.evaluate".into(),
                ms: 10000
            }),
            FrameError::Timeout(10000)
        );
        assert!(matches!(
            FrameError::from(CdpError::JavaScript("TypeError".into())),
            FrameError::Evaluation(_)
        ));
    }
}
