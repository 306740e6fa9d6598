//! Error taxonomy shared by the engine and its collaborators.
//!
//! - [`InputError`] rejects a request before any traversal begins.
//! - [`ProviderError`] is a page-level failure; the orchestrator degrades it to an
//!   empty-but-valid report.
//! - [`FrameError`] is a single-frame failure; the traversal controller degrades it
//!   to an empty finding set for that frame.

mod frame;
mod input;
mod provider;

pub use frame::*;
pub use input::*;
pub use provider::*;
