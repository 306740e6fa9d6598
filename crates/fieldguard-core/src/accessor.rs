//! Style/geometry accessor.
//!
//! Resolves the raw, possibly incomplete style data a provider captured into a
//! fully populated [`StyleSnapshot`]. Missing values fall back to CSS initial
//! values (`display: block`, zero geometry), so evaluation never fails on a
//! malformed or detached node.

use fieldguard_protocols::{ElementRef, Geometry, Viewport};

/// Resolved style, attribute and geometry values for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSnapshot {
    pub display: String,
    pub visibility: String,
    pub opacity: f64,
    pub clip: String,
    pub clip_path: String,
    pub font_size_px: Option<f64>,
    pub position: String,
    pub left_px: Option<f64>,
    pub overflow: String,
    pub color: String,
    pub background_color: String,
    pub aria_hidden: bool,
    pub geometry: Geometry,
    /// False when the provider supplied no layout for this element.
    pub geometry_resolved: bool,
    pub viewport: Viewport,
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self {
            display: "block".to_string(),
            visibility: "visible".to_string(),
            opacity: 1.0,
            clip: "auto".to_string(),
            clip_path: "none".to_string(),
            font_size_px: None,
            position: "static".to_string(),
            left_px: None,
            overflow: "visible".to_string(),
            color: String::new(),
            background_color: String::new(),
            aria_hidden: false,
            geometry: Geometry::default(),
            geometry_resolved: false,
            viewport: Viewport::default(),
        }
    }
}

/// Take a snapshot of an element. Pure: reads only the captured document.
pub fn snapshot(element: ElementRef<'_>) -> StyleSnapshot {
    let data = element.data();
    let raw = &data.style;
    let defaults = StyleSnapshot::default();

    let keyword = |value: &Option<String>, fallback: String| -> String {
        value
            .as_deref()
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or(fallback)
    };

    let display = keyword(&raw.display, defaults.display);
    // display: contents generates no box of its own
    let geometry_resolved = data.geometry.is_some() && display != "contents";

    StyleSnapshot {
        visibility: keyword(&raw.visibility, defaults.visibility),
        opacity: raw
            .opacity
            .as_deref()
            .and_then(parse_opacity)
            .unwrap_or(defaults.opacity),
        clip: keyword(&raw.clip, defaults.clip),
        clip_path: keyword(&raw.clip_path, defaults.clip_path),
        font_size_px: raw.font_size.as_deref().and_then(parse_length),
        position: keyword(&raw.position, defaults.position),
        left_px: raw.left.as_deref().and_then(parse_length),
        overflow: keyword(&raw.overflow, defaults.overflow),
        color: normalize_color(raw.color.as_deref()),
        background_color: normalize_color(raw.background_color.as_deref()),
        aria_hidden: element
            .attr("aria-hidden")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
        geometry: data.geometry.unwrap_or_default(),
        geometry_resolved,
        viewport: *element.document().viewport(),
        display,
    }
}

/// Parse `0`, `0.5`, `50%`.
fn parse_opacity(value: &str) -> Option<f64> {
    let value = value.trim();
    match value.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok().map(|p| p / 100.0),
        None => value.parse::<f64>().ok(),
    }
}

/// Parse the numeric prefix of a CSS length (`-9999px`, `0`, `1.5em`).
///
/// Returns `None` for keywords such as `auto`.
pub(crate) fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0)))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse::<f64>().ok()
}

fn normalize_color(value: Option<&str>) -> String {
    value
        .map(|v| {
            v.chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .unwrap_or_default()
}
