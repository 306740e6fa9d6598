//! Hidden-field evidence and findings.

use serde::{Deserialize, Serialize};

use super::style::BoundingBox;

/// Heuristic signal that classified an element as hidden.
///
/// Variants are declared in evaluation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    DisplayNone,
    VisibilityHidden,
    ZeroOpacity,
    AriaHidden,
    ZeroOffsetSize,
    ClipRect,
    ClipPath,
    ZeroFontSize,
    OffscreenAbsolute,
    OffscreenFixed,
    TinyBoundingBox,
    OverflowOffscreen,
    ColorMatch,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DisplayNone => "DISPLAY_NONE",
            Self::VisibilityHidden => "VISIBILITY_HIDDEN",
            Self::ZeroOpacity => "ZERO_OPACITY",
            Self::AriaHidden => "ARIA_HIDDEN",
            Self::ZeroOffsetSize => "ZERO_OFFSET_SIZE",
            Self::ClipRect => "CLIP_RECT",
            Self::ClipPath => "CLIP_PATH",
            Self::ZeroFontSize => "ZERO_FONT_SIZE",
            Self::OffscreenAbsolute => "OFFSCREEN_ABSOLUTE",
            Self::OffscreenFixed => "OFFSCREEN_FIXED",
            Self::TinyBoundingBox => "TINY_BOUNDING_BOX",
            Self::OverflowOffscreen => "OVERFLOW_OFFSCREEN",
            Self::ColorMatch => "COLOR_MATCH",
        }
    }

    /// Human-readable explanation.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::DisplayNone => "display: none",
            Self::VisibilityHidden => "visibility: hidden",
            Self::ZeroOpacity => "opacity: 0",
            Self::AriaHidden => "aria-hidden=\"true\"",
            Self::ZeroOffsetSize => "zero offset width or height",
            Self::ClipRect => "clipped by a clip rect",
            Self::ClipPath => "clipped by clip-path",
            Self::ZeroFontSize => "font-size: 0px",
            Self::OffscreenAbsolute => "absolutely positioned off-screen",
            Self::OffscreenFixed => "fixed position outside the viewport",
            Self::TinyBoundingBox => "bounding box of 10px or less",
            Self::OverflowOffscreen => "overflow hidden with an off-screen box",
            Self::ColorMatch => "text color matches background color",
        }
    }

    /// True for signals available without live layout.
    pub fn is_static_signal(&self) -> bool {
        matches!(
            self,
            Self::DisplayNone | Self::VisibilityHidden | Self::ZeroOpacity | Self::AriaHidden
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one element (or its ancestor chain) as hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenVerdict {
    pub reason: ReasonCode,
    /// Set when the reason was found on an ancestor rather than the element.
    pub inherited: bool,
}

impl HiddenVerdict {
    pub fn direct(reason: ReasonCode) -> Self {
        Self {
            reason,
            inherited: false,
        }
    }

    /// Wrap an ancestor's verdict as inherited.
    pub fn inherited_from(ancestor: HiddenVerdict) -> Self {
        Self {
            reason: ancestor.reason,
            inherited: true,
        }
    }
}

/// Evidence attached to a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingReason {
    /// The element's own style or attributes hide it.
    Style { code: ReasonCode },
    /// An ancestor hides the element.
    Inherited { code: ReasonCode },
    /// `<input type="hidden">`, reported independently of any style heuristic.
    ExplicitHiddenType,
}

impl FindingReason {
    pub fn code(&self) -> Option<ReasonCode> {
        match self {
            Self::Style { code } | Self::Inherited { code } => Some(*code),
            Self::ExplicitHiddenType => None,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::Style { code } => code.describe().to_string(),
            Self::Inherited { code } => {
                format!("inherited from ancestor: {}", code.describe())
            }
            Self::ExplicitHiddenType => "input declared with type=\"hidden\"".to_string(),
        }
    }
}

impl From<HiddenVerdict> for FindingReason {
    fn from(verdict: HiddenVerdict) -> Self {
        if verdict.inherited {
            Self::Inherited {
                code: verdict.reason,
            }
        } else {
            Self::Style {
                code: verdict.reason,
            }
        }
    }
}

/// Extra qualification of a finding beyond its visibility reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldQualifier {
    #[serde(rename = "not within a form")]
    NotWithinForm,
}

/// One reported hidden field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFinding {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: String,
    pub reason: FindingReason,
    pub description: String,
    /// `"main page"` or `"iframe(<url>)"`.
    pub location: String,
    pub selector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<FieldQualifier>,
}
