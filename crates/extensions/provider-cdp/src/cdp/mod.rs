//! Chrome DevTools Protocol (CDP) client.
//!
//! A single browser-level WebSocket is opened per browser; page targets are
//! driven through flattened sessions on that socket.

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
