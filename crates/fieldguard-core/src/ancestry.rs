//! Ancestor propagation.

use std::collections::HashSet;

use fieldguard_protocols::{ElementRef, HiddenVerdict, Strictness};

use crate::evaluator;

/// Walk the parent chain and return the first ancestor's verdict, marked as
/// inherited. Returns `None` at a root with no hidden ancestor, and also when
/// the chain revisits a node.
pub fn has_hidden_ancestor(element: ElementRef<'_>, strictness: Strictness) -> Option<HiddenVerdict> {
    let mut seen = HashSet::from([element.id()]);
    let mut current = element.parent();

    while let Some(ancestor) = current {
        if !seen.insert(ancestor.id()) {
            return None;
        }
        if let Some(verdict) = evaluator::classify(ancestor, strictness) {
            return Some(HiddenVerdict::inherited_from(verdict));
        }
        current = ancestor.parent();
    }
    None
}
