//! # fieldguard Protocols
//!
//! Shared data model and collaborator interfaces for the fieldguard scanner.
//! Contains only types and trait definitions - the decision logic lives in
//! `fieldguard-core`, and concrete document providers live under
//! `crates/extensions/`.
//!
//! ## Core Traits
//!
//! - [`DocumentProvider`] - Fetches (and optionally renders) a page for a strictness tier
//! - [`LoadedPage`] - A fetched page: main document, frame discovery, per-frame evaluation

pub mod error;
pub mod provider;
pub mod types;

pub use error::{FrameError, InputError, ProviderError};
pub use provider::{DocumentProvider, FetchRequest, LoadedPage};
pub use types::*;
