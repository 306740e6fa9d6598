//! Visibility heuristic evaluator.
//!
//! A pure decision function over [`StyleSnapshot`]s. Signals are checked in a
//! fixed priority order and evaluation stops at the first match, so every
//! hidden element maps to exactly one primary [`ReasonCode`].
//!
//! `type="hidden"` is not a signal here; the enumerator reports it separately.

use fieldguard_protocols::{ElementRef, HiddenVerdict, ReasonCode, Strictness};

use crate::accessor::{self, StyleSnapshot};

/// `left` at or beyond this offset counts as pushed off-screen.
pub const OFFSCREEN_LEFT_PX: f64 = -9999.0;

/// Bounding boxes this small in either dimension count as concealed.
pub const TINY_BOX_PX: f64 = 10.0;

type Signal = (ReasonCode, fn(&StyleSnapshot) -> bool);

/// Signals available from markup alone.
const STATIC_SIGNALS: &[Signal] = &[
    (ReasonCode::DisplayNone, |s| s.display == "none"),
    (ReasonCode::VisibilityHidden, |s| s.visibility == "hidden"),
    (ReasonCode::ZeroOpacity, |s| s.opacity == 0.0),
    (ReasonCode::AriaHidden, |s| s.aria_hidden),
];

/// Signals that need live layout. Checked after [`STATIC_SIGNALS`].
const RENDERED_SIGNALS: &[Signal] = &[
    (ReasonCode::ZeroOffsetSize, |s| {
        s.geometry_resolved && (s.geometry.offset_width == 0.0 || s.geometry.offset_height == 0.0)
    }),
    (ReasonCode::ClipRect, |s| {
        !s.clip.is_empty() && s.clip != "auto"
    }),
    (ReasonCode::ClipPath, |s| {
        !s.clip_path.is_empty() && s.clip_path != "none"
    }),
    (ReasonCode::ZeroFontSize, |s| s.font_size_px == Some(0.0)),
    (ReasonCode::OffscreenAbsolute, |s| {
        s.position == "absolute" && s.left_px.is_some_and(|left| left <= OFFSCREEN_LEFT_PX)
    }),
    (ReasonCode::OffscreenFixed, |s| {
        s.position == "fixed" && s.geometry_resolved && s.geometry.rect.is_outside(&s.viewport)
    }),
    (ReasonCode::TinyBoundingBox, |s| {
        s.geometry_resolved
            && (s.geometry.rect.width <= TINY_BOX_PX || s.geometry.rect.height <= TINY_BOX_PX)
    }),
    (ReasonCode::OverflowOffscreen, |s| {
        s.overflow == "hidden" && s.geometry_resolved && s.geometry.rect.is_outside(&s.viewport)
    }),
    (ReasonCode::ColorMatch, |s| {
        !s.color.is_empty() && s.color == s.background_color
    }),
];

/// Classify one element. Returns `None` when no signal fires.
pub fn classify(element: ElementRef<'_>, strictness: Strictness) -> Option<HiddenVerdict> {
    classify_snapshot(&accessor::snapshot(element), strictness).map(HiddenVerdict::direct)
}

/// Classify an already-resolved snapshot.
pub fn classify_snapshot(snapshot: &StyleSnapshot, strictness: Strictness) -> Option<ReasonCode> {
    let rendered: &[Signal] = match strictness {
        Strictness::Static => &[],
        Strictness::Rendered => RENDERED_SIGNALS,
    };
    STATIC_SIGNALS
        .iter()
        .chain(rendered)
        .find(|(_, fires)| fires(snapshot))
        .map(|(code, _)| *code)
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
