//! Wiring from [`Config`] to a ready [`ScanOrchestrator`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use fieldguard_config::{BrowserConfig, Config, ConfigLoader, FetchConfig, ScanConfig};
use fieldguard_core::{ExplicitHiddenPolicy, RiskThresholds, ScanOptions, ScanOrchestrator};
use fieldguard_provider_cdp::{BrowserManager, BrowserManagerConfig, CdpProvider};
use fieldguard_provider_static::{FetchError, FetcherConfig, StaticProvider};

/// Both providers plus the browser handle kept for shutdown.
pub(crate) struct Engine {
    pub orchestrator: Arc<ScanOrchestrator>,
    pub browser: Arc<BrowserManager>,
}

impl Engine {
    pub(crate) fn build(config: &Config) -> Result<Self, FetchError> {
        let static_provider = Arc::new(StaticProvider::new(fetcher_config(&config.fetch))?);
        let browser = Arc::new(BrowserManager::new(browser_config(&config.browser)));
        let rendered_provider = Arc::new(CdpProvider::new(browser.clone()));

        let orchestrator = ScanOrchestrator::new(
            static_provider,
            rendered_provider,
            scan_options(&config.scan),
        );

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            browser,
        })
    }
}

pub(crate) fn scan_options(scan: &ScanConfig) -> ScanOptions {
    ScanOptions {
        policy: ExplicitHiddenPolicy::from_report_flag(scan.report_explicit_hidden),
        selector_max_len: scan.selector_max_len,
        thresholds: RiskThresholds {
            medium_at: scan.risk.medium_at,
            high_at: scan.risk.high_at,
        },
        page_timeout: Duration::from_millis(scan.page_timeout_ms),
        frame_timeout: Duration::from_millis(scan.frame_timeout_ms),
        settle_medium: Duration::from_millis(scan.settle_medium_ms),
        settle_advanced: Duration::from_millis(scan.settle_advanced_ms),
    }
}

pub(crate) fn fetcher_config(fetch: &FetchConfig) -> FetcherConfig {
    FetcherConfig {
        user_agent: fetch.user_agent.clone(),
        timeout: Duration::from_secs(fetch.timeout_secs),
        max_body_bytes: fetch.max_body_bytes,
    }
}

pub(crate) fn browser_config(browser: &BrowserConfig) -> BrowserManagerConfig {
    let expand = |p: &String| PathBuf::from(ConfigLoader::expand_path(p));
    BrowserManagerConfig {
        debug_port: browser.debug_port,
        viewport_width: browser.viewport_width,
        viewport_height: browser.viewport_height,
        chrome_path: browser.chrome_path.as_ref().map(expand),
        profile_dir: browser.profile_dir.as_ref().map(expand),
        headless: browser.headless,
        ..BrowserManagerConfig::default()
    }
}
