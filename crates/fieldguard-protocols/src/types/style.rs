//! Style and geometry snapshot types.

use serde::{Deserialize, Serialize};

/// Style properties as reported by a document provider.
///
/// Every property is optional: a static provider only knows what inline styles
/// declare, and a rendered provider may fail to resolve a property for a
/// detached node. Consumers resolve missing values through the style accessor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStyle {
    pub display: Option<String>,
    pub visibility: Option<String>,
    pub opacity: Option<String>,
    pub clip: Option<String>,
    pub clip_path: Option<String>,
    pub font_size: Option<String>,
    pub position: Option<String>,
    pub left: Option<String>,
    pub overflow: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
}

impl RawStyle {
    /// Parse an inline `style` attribute (`"display: none; color: red"`).
    ///
    /// Unknown properties are ignored. Later declarations win, and
    /// `!important` markers are stripped.
    pub fn from_inline(style: &str) -> Self {
        let mut raw = Self::default();
        for declaration in style.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim().to_ascii_lowercase();
            let value = value.trim_end_matches("!important").trim().to_string();
            if value.is_empty() {
                continue;
            }
            raw.set(&name, value);
        }
        raw
    }

    /// Set a property by its CSS name. Returns `false` for unknown properties.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "display" => &mut self.display,
            "visibility" => &mut self.visibility,
            "opacity" => &mut self.opacity,
            "clip" => &mut self.clip,
            "clip-path" => &mut self.clip_path,
            "font-size" => &mut self.font_size,
            "position" => &mut self.position,
            "left" => &mut self.left,
            "overflow" => &mut self.overflow,
            "color" => &mut self.color,
            "background-color" => &mut self.background_color,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Viewport dimensions used for off-screen checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Bounding rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True when no part of the rectangle intersects the viewport.
    pub fn is_outside(&self, viewport: &Viewport) -> bool {
        self.right() <= 0.0
            || self.bottom() <= 0.0
            || self.left >= viewport.width
            || self.top >= viewport.height
    }
}

/// Layout geometry of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    pub offset_width: f64,
    pub offset_height: f64,
    pub rect: BoundingBox,
}
