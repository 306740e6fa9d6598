//! # fieldguard Core
//!
//! Visibility classification and aggregation engine.
//!
//! ## Components
//!
//! - [`accessor`] - Resolves captured style and geometry into a [`StyleSnapshot`]
//! - [`evaluator`] - Pure heuristic classifier with static and rendered tiers
//! - [`ancestry`] - Inherited visibility through the parent chain
//! - [`enumerator`] - Per-document field findings in document order
//! - [`traversal`] - Main page plus frames with per-frame failure isolation
//! - [`risk`] - Finding count to risk level and recommendations
//! - [`ScanOrchestrator`] - Tier selection and report assembly
//!
//! Control flow: orchestrator, traversal, enumerator (evaluator and ancestry per
//! field), then risk aggregation.

pub mod accessor;
pub mod ancestry;
pub mod enumerator;
pub mod evaluator;
pub mod orchestrator;
pub mod risk;
pub mod selector;
pub mod traversal;

pub use accessor::{snapshot, StyleSnapshot};
pub use ancestry::has_hidden_ancestor;
pub use enumerator::{enumerate_fields, EnumerationOptions, ExplicitHiddenPolicy};
pub use evaluator::{classify, classify_snapshot};
pub use orchestrator::{ScanOptions, ScanOrchestrator, ScanRequest};
pub use risk::{RiskAggregator, RiskThresholds};
pub use selector::{derive_selector, DEFAULT_SELECTOR_MAX_LEN};
pub use traversal::{FrameTraversal, TraversalOutcome};
