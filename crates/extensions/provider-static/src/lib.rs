//! Static-tier document provider for fieldguard.
//!
//! Fetches markup over HTTP and parses it into a [`Document`] whose styles come
//! from inline `style` attributes only. Geometry is never resolved at this tier.
//!
//! [`Document`]: fieldguard_protocols::Document

mod error;
mod fetcher;
mod parser;
mod provider;

pub use error::FetchError;
pub use fetcher::{Fetcher, FetcherConfig};
pub use parser::parse_html;
pub use provider::{StaticPage, StaticProvider};
