//! BrowserManager core: locate, launch or reuse Chrome, and hold the CDP client.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cdp::CdpClient;
use super::{BrowserError, BrowserManagerConfig};

const STARTUP_POLL_INTERVAL: Duration = Duration::from_millis(200);
const STARTUP_POLL_ATTEMPTS: u32 = 30;

/// Owns the browser connection shared by every scan.
pub struct BrowserManager {
    config: BrowserManagerConfig,
    client: Mutex<Option<Arc<CdpClient>>>,
    /// Chrome process handle (if we launched it).
    chrome_process: Mutex<Option<Child>>,
}

impl BrowserManager {
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: Mutex::new(None),
            chrome_process: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    /// Find a Chrome executable. An existing `configured` path wins.
    pub fn find_chrome(configured: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = configured {
            return path.exists().then(|| path.to_path_buf());
        }

        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Check if Chrome is already listening on the debug port.
    async fn is_chrome_running(&self) -> bool {
        reqwest::get(format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok_and(|r| r.status().is_success())
    }

    /// Launch Chrome with remote debugging enabled.
    async fn launch_chrome(&self) -> Result<Child, BrowserError> {
        let chrome_path = Self::find_chrome(self.config.chrome_path.as_deref())
            .ok_or(BrowserError::ChromeNotFound)?;
        let profile_dir = self.config.get_profile_dir();

        if let Err(e) = tokio::fs::create_dir_all(&profile_dir).await {
            warn!("Failed to create profile directory: {}", e);
        }

        info!(
            chrome = %chrome_path.display(),
            profile = %profile_dir.display(),
            headless = self.config.headless,
            "Launching Chrome"
        );

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={}", self.config.debug_port))
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--mute-audio")
            .arg("--hide-scrollbars")
            // Keep cross-site frames in the page renderer so they are reachable
            // from the page session.
            .arg("--disable-features=IsolateOrigins,site-per-process")
            .arg(format!(
                "--window-size={},{}",
                self.config.viewport_width, self.config.viewport_height
            ))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        if self.config.headless {
            cmd.arg("--headless=new");
        }

        let child = cmd
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Return a live CDP client, launching Chrome if nothing listens on the port.
    pub async fn connect(&self) -> Result<Arc<CdpClient>, BrowserError> {
        let mut slot = self.client.lock().await;
        if let Some(client) = slot.as_ref().filter(|c| c.is_alive()) {
            return Ok(client.clone());
        }

        if !self.is_chrome_running().await {
            info!("Chrome not running on port {}, launching", self.config.debug_port);
            let child = self.launch_chrome().await?;
            *self.chrome_process.lock().await = Some(child);
            self.wait_for_startup().await?;
        } else {
            debug!("Chrome already running on port {}", self.config.debug_port);
        }

        let client = Arc::new(
            CdpClient::connect(&self.config.endpoint(), self.config.call_timeout).await?,
        );
        *slot = Some(client.clone());

        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(client)
    }

    async fn wait_for_startup(&self) -> Result<(), BrowserError> {
        for _ in 0..STARTUP_POLL_ATTEMPTS {
            tokio::time::sleep(STARTUP_POLL_INTERVAL).await;
            if self.is_chrome_running().await {
                return Ok(());
            }
        }
        Err(BrowserError::LaunchFailed(
            "Chrome failed to start within timeout".to_string(),
        ))
    }

    /// Drop the connection and kill Chrome if this manager launched it.
    pub async fn shutdown(&self) {
        self.client.lock().await.take();
        if let Some(mut child) = self.chrome_process.lock().await.take() {
            info!("Shutting down Chrome");
            let _ = child.kill().await;
        }
    }
}
