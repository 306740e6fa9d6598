//! Core data types shared across fieldguard crates.

mod document;
mod finding;
mod report;
mod style;

pub use document::*;
pub use finding::*;
pub use report::*;
pub use style::*;
