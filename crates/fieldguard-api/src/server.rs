//! HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::http::routes::create_router;
use crate::state::AppState;

/// Server bind configuration.
#[derive(Debug, Clone)]
pub struct InterfaceConfig {
    pub host: String,
    pub port: u16,
}

impl InterfaceConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

pub struct InterfaceServer {
    config: InterfaceConfig,
    state: Arc<AppState>,
}

impl InterfaceServer {
    pub fn new(config: InterfaceConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = create_router(self.state.clone());

        let addr: SocketAddr = self.addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("fieldguard listening on {}", addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldguard_core::{ScanOptions, ScanOrchestrator};
    use fieldguard_protocols::{DocumentProvider, FetchRequest, LoadedPage, ProviderError};

    struct Unused;

    #[async_trait::async_trait]
    impl DocumentProvider for Unused {
        fn name(&self) -> &str {
            "unused"
        }

        async fn fetch(&self, _: &FetchRequest) -> Result<Box<dyn LoadedPage>, ProviderError> {
            Err(ProviderError::Unavailable("unused".into()))
        }
    }

    fn state() -> Arc<AppState> {
        let provider: Arc<dyn DocumentProvider> = Arc::new(Unused);
        let orchestrator = ScanOrchestrator::new(provider.clone(), provider, ScanOptions::default());
        Arc::new(AppState::new(Arc::new(orchestrator)))
    }

    #[test]
    fn test_interface_config_default() {
        let config = InterfaceConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_interface_server_addr_format() {
        let server = InterfaceServer::new(InterfaceConfig::new("0.0.0.0", 3000), state());
        assert_eq!(server.addr(), "0.0.0.0:3000");
    }

    #[tokio::test]
    async fn test_run_rejects_bad_host() {
        let server = InterfaceServer::new(InterfaceConfig::new("not a host", 3000), state());
        assert!(server.run(async {}).await.is_err());
    }
}
