//! Field enumerator.
//!
//! Walks one document and produces the findings for its input-like elements,
//! in document order. Each field is paired with the form that owns it, if any.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use fieldguard_protocols::{
    Document, ElementRef, FieldFinding, FieldQualifier, FindingReason, FormView, Strictness,
};

use crate::ancestry::has_hidden_ancestor;
use crate::evaluator::classify;
use crate::selector::{derive_selector, DEFAULT_SELECTOR_MAX_LEN};

/// How `<input type="hidden">` elements are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplicitHiddenPolicy {
    /// Report every explicit hidden input.
    Report,
    /// Suspicious-only reporting: explicit hidden inputs are omitted.
    Skip,
}

impl Default for ExplicitHiddenPolicy {
    fn default() -> Self {
        Self::Report
    }
}

impl ExplicitHiddenPolicy {
    pub fn from_report_flag(report: bool) -> Self {
        if report { Self::Report } else { Self::Skip }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EnumerationOptions {
    pub strictness: Strictness,
    pub policy: ExplicitHiddenPolicy,
    pub selector_max_len: usize,
}

impl EnumerationOptions {
    pub fn new(strictness: Strictness) -> Self {
        Self {
            strictness,
            policy: ExplicitHiddenPolicy::default(),
            selector_max_len: DEFAULT_SELECTOR_MAX_LEN,
        }
    }

    pub fn with_policy(mut self, policy: ExplicitHiddenPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_selector_max_len(mut self, max_len: usize) -> Self {
        self.selector_max_len = max_len;
        self
    }
}

/// Enumerate the hidden fields of `doc`, tagging each finding with `location`.
pub fn enumerate_fields(
    doc: &Document,
    location: &str,
    options: &EnumerationOptions,
) -> Vec<FieldFinding> {
    let forms = doc.forms();
    let owner: HashMap<_, _> = forms
        .iter()
        .map(|view| (view.form.id(), view))
        .collect();

    doc.input_like()
        .filter_map(|field| {
            let form = field
                .closest_form()
                .and_then(|f| owner.get(&f.id()).copied());
            inspect(field, form, location, options)
        })
        .collect()
}

fn inspect(
    field: ElementRef<'_>,
    form: Option<&FormView<'_>>,
    location: &str,
    options: &EnumerationOptions,
) -> Option<FieldFinding> {
    let reason = if field.is_explicit_hidden_input() {
        match options.policy {
            ExplicitHiddenPolicy::Skip => return None,
            ExplicitHiddenPolicy::Report => FindingReason::ExplicitHiddenType,
        }
    } else {
        let verdict = classify(field, options.strictness)
            .or_else(|| has_hidden_ancestor(field, options.strictness))?;
        FindingReason::from(verdict)
    };

    Some(FieldFinding {
        name: field
            .attr("name")
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        field_type: field.input_type(),
        description: reason.description(),
        reason,
        location: location.to_string(),
        selector: derive_selector(field, form, options.selector_max_len),
        bounding_box: field.data().geometry.map(|g| g.rect),
        qualifier: form.is_none().then_some(FieldQualifier::NotWithinForm),
    })
}

#[cfg(test)]
#[path = "enumerator_tests.rs"]
mod tests;
