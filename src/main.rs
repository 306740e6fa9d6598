//! fieldguard - hidden form-field scanner.
//!
//! `serve` (the default) runs the HTTP API; `scan` runs one scan and prints the
//! report to stdout.

mod builder;
mod cli;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fieldguard_api::{AppState, InterfaceConfig, InterfaceServer, ScanResponse};
use fieldguard_config::{Config, ConfigError, ConfigLoader, ConfigValidator, LoggingConfig};
use fieldguard_core::{ExplicitHiddenPolicy, ScanRequest};

use crate::builder::Engine;
use crate::cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Console output goes to stderr so `scan` keeps stdout for the report.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = logging.resolved_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("fieldguard")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes on drop, so it must outlive every log call.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Load the config file. A missing file falls back to defaults.
fn load_config(path: &Path) -> Result<(Config, bool), ConfigError> {
    match ConfigLoader::load(path) {
        Ok(config) => Ok((config, true)),
        Err(ConfigError::NotFound(_)) => Ok((Config::default(), false)),
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (config, from_file) = load_config(&cli.config)?;
    init_tracing(&config.logging)?;

    if from_file {
        info!("Loaded configuration from {}", cli.config.display());
    } else {
        warn!(
            "Config file {} not found, using defaults",
            cli.config.display()
        );
    }

    let warnings = ConfigValidator::validate(&config)?.into_result()?;
    for warning in warnings {
        warn!("Config warning at {}: {}", warning.path, warning.message);
    }

    match cli.command {
        None => run_server(config, None, None).await,
        Some(Commands::Serve { host, port }) => run_server(config, host, port).await,
        Some(Commands::Scan {
            url,
            level,
            skip_explicit_hidden,
            pretty,
        }) => run_scan(config, &url, &level, skip_explicit_hidden, pretty).await,
    }
}

/// Run the HTTP server until Ctrl-C.
async fn run_server(
    config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting fieldguard v{}", env!("CARGO_PKG_VERSION"));

    let engine = Engine::build(&config)?;
    let state = Arc::new(AppState::new(engine.orchestrator.clone()));

    let interface = InterfaceConfig::new(
        host.unwrap_or(config.server.host),
        port.unwrap_or(config.server.port),
    );
    let server = InterfaceServer::new(interface, state);

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received");
    };
    let result = server.run(shutdown).await;

    engine.browser.shutdown().await;
    info!("fieldguard stopped");
    result
}

/// Run one scan and print the report.
async fn run_scan(
    config: Config,
    url: &str,
    level: &str,
    skip_explicit_hidden: bool,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut request = ScanRequest::parse(url, level)?;
    if skip_explicit_hidden {
        request = request.with_policy(ExplicitHiddenPolicy::Skip);
    }

    let engine = Engine::build(&config)?;
    let report = engine.orchestrator.scan(&request).await;
    engine.browser.shutdown().await;

    let response = ScanResponse::from(report);
    let output = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{output}");
    Ok(())
}
