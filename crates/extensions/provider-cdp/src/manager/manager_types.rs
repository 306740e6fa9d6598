//! Browser manager type definitions and configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use fieldguard_protocols::{ProviderError, Viewport};

use crate::cdp::CdpError;

/// Browser manager errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Chrome not found. Install Chrome or Chromium, or set browser.chrome_path")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error(transparent)]
    Cdp(#[from] CdpError),
}

impl From<BrowserError> for ProviderError {
    fn from(e: BrowserError) -> Self {
        match e {
            BrowserError::Cdp(e) => e.into(),
            other => ProviderError::Unavailable(other.to_string()),
        }
    }
}

/// Browser configuration.
#[derive(Debug, Clone)]
pub struct BrowserManagerConfig {
    /// Chrome debugging port.
    pub debug_port: u16,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Explicit executable; well-known locations are searched when unset.
    pub chrome_path: Option<PathBuf>,
    pub profile_dir: Option<PathBuf>,
    pub headless: bool,
    /// Upper bound for a single CDP command.
    pub call_timeout: Duration,
}

impl Default for BrowserManagerConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            viewport_width: 1280,
            viewport_height: 720,
            chrome_path: None,
            profile_dir: None,
            headless: true,
            call_timeout: Duration::from_secs(30),
        }
    }
}

impl BrowserManagerConfig {
    /// Get the profile directory, falling back to `~/.fieldguard/browser-profile`.
    pub fn get_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".fieldguard")
                .join("browser-profile")
        })
    }

    /// Get the CDP endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.debug_port)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: f64::from(self.viewport_width),
            height: f64::from(self.viewport_height),
        }
    }
}
