//! A session attached to a single page target.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use fieldguard_protocols::Viewport;

use super::client::CdpClient;
use super::error::CdpError;
use super::protocol::{ExceptionDetails, FrameTree};

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);
const ISOLATED_WORLD_NAME: &str = "fieldguard";

pub struct PageSession {
    client: Arc<CdpClient>,
    target_id: String,
    session_id: String,
}

impl PageSession {
    pub(crate) fn new(client: Arc<CdpClient>, target_id: String, session_id: String) -> Self {
        Self {
            client,
            target_id,
            session_id,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.client
            .call(method, params, Some(&self.session_id))
            .await
    }

    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    pub async fn set_viewport(&self, viewport: &Viewport) -> Result<(), CdpError> {
        self.call(
            "Emulation.setDeviceMetricsOverride",
            Some(json!({
                "width": viewport.width as u32,
                "height": viewport.height as u32,
                "deviceScaleFactor": 1,
                "mobile": false,
            })),
        )
        .await?;
        Ok(())
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate and wait until the document is at least interactive.
    pub async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), CdpError> {
        let load = async {
            let result = self
                .call("Page.navigate", Some(json!({"url": url})))
                .await?;

            if let Some(error) = result.get("errorText").and_then(Value::as_str) {
                if !error.is_empty() {
                    return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
                }
            }
            self.wait_for_load().await
        };

        match tokio::time::timeout(timeout, load).await {
            Ok(result) => {
                debug!("Navigated to {}", url);
                result
            }
            Err(_) => Err(CdpError::Timeout {
                method: "Page.navigate".to_string(),
                ms: timeout.as_millis() as u64,
            }),
        }
    }

    /// Poll `document.readyState`. Bounded by the caller's timeout.
    async fn wait_for_load(&self) -> Result<(), CdpError> {
        loop {
            let state = self.evaluate("document.readyState").await?;
            if matches!(state.as_str(), Some("complete" | "interactive")) {
                return Ok(());
            }
            tokio::time::sleep(LOAD_POLL_INTERVAL).await;
        }
    }

    // ========================================================================
    // Runtime
    // ========================================================================

    /// Evaluate an expression in the page's main world.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        self.evaluate_in_context(expression, None).await
    }

    /// Evaluate an expression, optionally inside a specific execution context.
    pub async fn evaluate_in_context(
        &self,
        expression: &str,
        context_id: Option<i64>,
    ) -> Result<Value, CdpError> {
        let mut params = json!({
            "expression": expression,
            "returnByValue": true,
            "awaitPromise": true,
        });
        if let Some(id) = context_id {
            params["contextId"] = json!(id);
        }

        let result = self.call("Runtime.evaluate", Some(params)).await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let details: ExceptionDetails = serde_json::from_value(exception.clone())?;
            return Err(CdpError::JavaScript(details.text));
        }

        Ok(result["result"]["value"].clone())
    }

    // ========================================================================
    // Frames
    // ========================================================================

    pub async fn frame_tree(&self) -> Result<FrameTree, CdpError> {
        let result = self.call("Page.getFrameTree", None).await?;
        Ok(serde_json::from_value(result["frameTree"].clone())?)
    }

    /// Create an isolated world in `frame_id` and return its execution context id.
    pub async fn create_isolated_world(&self, frame_id: &str) -> Result<i64, CdpError> {
        let result = self
            .call(
                "Page.createIsolatedWorld",
                Some(json!({
                    "frameId": frame_id,
                    "worldName": ISOLATED_WORLD_NAME,
                })),
            )
            .await?;
        result["executionContextId"]
            .as_i64()
            .ok_or_else(|| CdpError::InvalidResponse("Missing executionContextId".to_string()))
    }
}
