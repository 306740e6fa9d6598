//! Document provider configuration (static fetcher and browser).

use serde::{Deserialize, Serialize};

use super::default_true;

/// Static-tier HTTP fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,

    /// Response bodies are truncated to this many bytes before parsing.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_user_agent() -> String {
    format!("fieldguard/{}", env!("CARGO_PKG_VERSION"))
}

fn default_fetch_timeout_secs() -> u64 {
    20
}

fn default_max_body_bytes() -> usize {
    5 * 1024 * 1024
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_fetch_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Rendered-tier browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Remote debugging port. An instance already listening there is reused.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default = "default_true")]
    pub headless: bool,

    /// Chrome executable. Well-known install locations are searched when unset.
    #[serde(default)]
    pub chrome_path: Option<String>,

    /// User data directory. Defaults to `~/.fieldguard/browser-profile`.
    #[serde(default)]
    pub profile_dir: Option<String>,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
}

fn default_debug_port() -> u16 {
    9222
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: default_true(),
            chrome_path: None,
            profile_dir: None,
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}
