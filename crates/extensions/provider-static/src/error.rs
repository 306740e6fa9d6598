//! HTTP fetch errors.

use thiserror::Error;

use fieldguard_protocols::{FrameError, ProviderError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),
}

impl From<FetchError> for ProviderError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout(ms) => ProviderError::Timeout(ms),
            other => ProviderError::Unreachable(other.to_string()),
        }
    }
}

impl From<FetchError> for FrameError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout(ms) => FrameError::Timeout(ms),
            FetchError::Status { status: 401 | 403, url } => FrameError::AccessDenied(url),
            other => FrameError::Evaluation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = FetchError::Status {
            status: 404,
            url: "https://shop.example/missing".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 from https://shop.example/missing");
    }

    #[test]
    fn test_into_provider_error() {
        assert_eq!(
            ProviderError::from(FetchError::Timeout(20_000)),
            ProviderError::Timeout(20_000)
        );
        let err = ProviderError::from(FetchError::Status {
            status: 503,
            url: "https://shop.example".to_string(),
        });
        assert!(matches!(err, ProviderError::Unreachable(msg) if msg.contains("503")));
    }

    #[test]
    fn test_into_frame_error() {
        let denied = FrameError::from(FetchError::Status {
            status: 403,
            url: "https://ads.example".to_string(),
        });
        assert_eq!(denied, FrameError::AccessDenied("https://ads.example".to_string()));

        let missing = FrameError::from(FetchError::Status {
            status: 404,
            url: "https://ads.example".to_string(),
        });
        assert!(matches!(missing, FrameError::Evaluation(_)));
    }
}
