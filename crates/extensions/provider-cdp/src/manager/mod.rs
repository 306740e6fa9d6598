//! Browser instance manager.
//!
//! Reuses a Chrome already listening on the debug port, or launches one with
//! remote debugging enabled. A launched instance is killed with the manager.

mod manager_core;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{BrowserError, BrowserManagerConfig};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
