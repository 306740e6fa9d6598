//! Rendered-tier [`DocumentProvider`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use fieldguard_protocols::{
    Document, DocumentProvider, FetchRequest, FrameError, FrameRef, LoadedPage, ProviderError,
};

use crate::cdp::{CdpClient, CdpError, PageSession};
use crate::manager::BrowserManager;
use crate::snapshot;

/// Renders pages in Chrome. Each fetch gets its own browser context.
pub struct CdpProvider {
    manager: Arc<BrowserManager>,
}

impl CdpProvider {
    pub fn new(manager: Arc<BrowserManager>) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &Arc<BrowserManager> {
        &self.manager
    }

    async fn open(
        &self,
        lease: &ContextLease,
        request: &FetchRequest,
    ) -> Result<(PageSession, Document), CdpError> {
        let viewport = self.manager.config().viewport();
        let target_id = lease.client.create_target(&lease.context_id).await?;
        let session = lease.client.attach(&target_id).await?;
        session.set_viewport(&viewport).await?;
        session.navigate(request.url.as_str(), request.timeout).await?;

        if !request.settle.is_zero() {
            tokio::time::sleep(request.settle).await;
        }

        // Page scripts cannot patch the isolated world's globals.
        let root = session.frame_tree().await?;
        let context_id = session.create_isolated_world(&root.frame.id).await?;
        let document = snapshot::capture(&session, Some(context_id), viewport).await?;
        Ok((session, document))
    }
}

#[async_trait]
impl DocumentProvider for CdpProvider {
    fn name(&self) -> &str {
        "cdp"
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<Box<dyn LoadedPage>, ProviderError> {
        let client = self.manager.connect().await?;
        let lease = ContextLease::acquire(client).await?;

        match self.open(&lease, request).await {
            Ok((session, document)) => {
                debug!(
                    url = %request.url,
                    elements = document.len(),
                    context = %lease.context_id,
                    "Captured rendered document"
                );
                Ok(Box::new(CdpPage {
                    session,
                    document,
                    lease,
                }))
            }
            Err(e) => {
                lease.release().await;
                Err(e.into())
            }
        }
    }
}

/// A rendered page inside its own browser context.
pub struct CdpPage {
    session: PageSession,
    document: Document,
    lease: ContextLease,
}

#[async_trait]
impl LoadedPage for CdpPage {
    fn document(&self) -> &Document {
        &self.document
    }

    async fn frames(&self) -> Result<Vec<FrameRef>, FrameError> {
        let tree = self.session.frame_tree().await?;
        Ok(tree
            .descendants()
            .into_iter()
            .map(|frame| FrameRef::new(frame.id.clone(), frame.url.clone()))
            .collect())
    }

    async fn evaluate_in_frame(&self, frame: &FrameRef) -> Result<Document, FrameError> {
        let context_id = self.session.create_isolated_world(&frame.id).await?;
        let document =
            snapshot::capture(&self.session, Some(context_id), *self.document.viewport()).await?;
        Ok(document)
    }

    async fn close(&self) {
        self.lease.release().await;
    }
}

/// Ownership of one browser context. Disposed on release, or on drop when a
/// scan is abandoned before release.
struct ContextLease {
    client: Arc<CdpClient>,
    context_id: String,
    released: AtomicBool,
}

impl ContextLease {
    fn new(client: Arc<CdpClient>, context_id: String) -> Self {
        Self {
            client,
            context_id,
            released: AtomicBool::new(false),
        }
    }

    /// Create a browser context in a detached task. If the caller is cancelled
    /// mid-creation, the unclaimed lease is dropped with the task and disposes
    /// the context.
    async fn acquire(client: Arc<CdpClient>) -> Result<Self, CdpError> {
        let task = tokio::spawn(async move {
            let context_id = client.create_browser_context().await?;
            Ok::<_, CdpError>(Self::new(client, context_id))
        });
        task.await
            .map_err(|e| CdpError::InvalidResponse(format!("browser context task failed: {e}")))?
    }

    async fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.client.dispose_browser_context(&self.context_id).await {
            warn!(context = %self.context_id, error = %e, "Failed to dispose browser context");
        }
    }
}

impl Drop for ContextLease {
    fn drop(&mut self) {
        if self.released.load(Ordering::SeqCst) {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let client = self.client.clone();
        let context_id = std::mem::take(&mut self.context_id);
        handle.spawn(async move {
            if let Err(e) = client.dispose_browser_context(&context_id).await {
                warn!(context = %context_id, error = %e, "Failed to dispose browser context");
            }
        });
    }
}
