//! Rendered-tier document provider for fieldguard.
//!
//! Drives Chrome over the DevTools Protocol: every fetch opens an isolated
//! browser context, navigates, waits for the settle delay and snapshots the
//! document with computed style and geometry. Nested frames are snapshotted
//! in isolated worlds.

pub mod cdp;
pub mod manager;
mod provider;
pub mod snapshot;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
pub use provider::{CdpPage, CdpProvider};
