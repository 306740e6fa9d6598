use super::*;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.dir.is_none());
}

#[test]
fn test_scan_defaults() {
    let scan = ScanConfig::default();
    assert!(scan.report_explicit_hidden);
    assert_eq!(scan.selector_max_len, 120);
    assert_eq!(scan.frame_timeout_ms, 10_000);
    assert_eq!(scan.page_timeout_ms, 30_000);
    assert_eq!(scan.settle_medium_ms, 1_500);
    assert_eq!(scan.settle_advanced_ms, 3_000);
    assert_eq!(scan.risk.medium_at, 3);
    assert_eq!(scan.risk.high_at, 7);
}

#[test]
fn test_provider_defaults() {
    let fetch = FetchConfig::default();
    assert!(fetch.user_agent.starts_with("fieldguard/"));
    assert_eq!(fetch.timeout_secs, 20);
    assert_eq!(fetch.max_body_bytes, 5 * 1024 * 1024);

    let browser = BrowserConfig::default();
    assert_eq!(browser.debug_port, 9222);
    assert!(browser.headless);
    assert!(browser.chrome_path.is_none());
    assert_eq!((browser.viewport_width, browser.viewport_height), (1280, 720));
}

#[test]
fn test_partial_section_keeps_defaults() {
    let config: Config = toml::from_str(
        r#"
        [scan]
        selector_max_len = 64
        "#,
    )
    .unwrap();
    assert_eq!(config.scan.selector_max_len, 64);
    assert_eq!(config.scan.risk.high_at, 7);
    assert!(config.scan.report_explicit_hidden);
}

#[test]
fn test_logging_dir_resolution() {
    let logging = LoggingConfig {
        level: "info".to_string(),
        dir: Some("/var/log/fieldguard".to_string()),
    };
    assert_eq!(logging.resolved_dir(), PathBuf::from("/var/log/fieldguard"));

    let default_dir = LoggingConfig::default().resolved_dir();
    assert!(default_dir.ends_with(".fieldguard/logs"));
}

#[test]
fn test_config_serializes_back_to_toml() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    assert!(text.contains("[scan.risk]"));
    let reparsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(reparsed.server.port, config.server.port);
}
