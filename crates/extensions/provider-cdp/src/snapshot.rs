//! In-page document snapshot.
//!
//! [`SNAPSHOT_SCRIPT`] runs inside a frame and returns every input-like element,
//! every form, and each of their ancestor chains in document order, with
//! computed style and layout geometry. Parents are given as indices into the
//! returned node list.

use std::collections::BTreeMap;

use serde::Deserialize;

use fieldguard_protocols::{Document, ElementData, Geometry, NodeId, RawStyle, Viewport};

use crate::cdp::{CdpError, PageSession};

pub const SNAPSHOT_SCRIPT: &str = r#"(() => {
  const wanted = new Set();
  for (const el of document.querySelectorAll('input, textarea, select, form')) {
    for (let n = el; n && n.nodeType === 1 && !wanted.has(n); n = n.parentElement) {
      wanted.add(n);
    }
  }
  const nodes = Array.from(document.querySelectorAll('*')).filter((n) => wanted.has(n));
  const index = new Map(nodes.map((n, i) => [n, i]));
  const props = ['display', 'visibility', 'opacity', 'clip', 'clip-path', 'font-size',
    'position', 'left', 'overflow', 'color', 'background-color'];
  const camel = (p) => p.replace(/-([a-z])/g, (_, c) => c.toUpperCase());
  return {
    url: location.href,
    viewport: { width: window.innerWidth, height: window.innerHeight },
    nodes: nodes.map((el) => {
      const computed = window.getComputedStyle(el);
      const style = {};
      for (const p of props) style[camel(p)] = computed.getPropertyValue(p);
      const attributes = {};
      for (const a of el.attributes) attributes[a.name] = a.value;
      const r = el.getBoundingClientRect();
      return {
        tag: el.tagName.toLowerCase(),
        parent: index.has(el.parentElement) ? index.get(el.parentElement) : null,
        attributes,
        style,
        geometry: {
          offsetWidth: el.offsetWidth ?? r.width,
          offsetHeight: el.offsetHeight ?? r.height,
          rect: { top: r.top, left: r.left, width: r.width, height: r.height },
        },
      };
    }),
  };
})()"#;

/// Result of [`SNAPSHOT_SCRIPT`].
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSnapshot {
    pub url: String,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub nodes: Vec<SnapshotNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotNode {
    pub tag: String,
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub style: RawStyle,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl DocumentSnapshot {
    /// Build a document. Out-of-range parent indices are dropped.
    pub fn into_document(self, fallback_viewport: Viewport) -> Document {
        let viewport = self
            .viewport
            .filter(|v| v.width > 0.0 && v.height > 0.0)
            .unwrap_or(fallback_viewport);
        let mut doc = Document::new(self.url).with_viewport(viewport);

        let mut parents = Vec::with_capacity(self.nodes.len());
        for node in self.nodes {
            parents.push(node.parent);
            let mut data = ElementData::new(node.tag).with_style(normalize(node.style));
            for (name, value) in node.attributes {
                data = data.with_attr(name, value);
            }
            if let Some(geometry) = node.geometry {
                data = data.with_geometry(geometry);
            }
            doc.push(None, data);
        }

        let len = parents.len();
        for (i, parent) in parents.into_iter().enumerate() {
            let parent = parent.filter(|&p| p < len && p != i).map(NodeId);
            doc.set_parent(NodeId(i), parent);
        }
        doc
    }
}

/// Computed values come back as possibly empty strings.
fn normalize(style: RawStyle) -> RawStyle {
    let clean = |v: Option<String>| {
        v.map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
    };
    RawStyle {
        display: clean(style.display),
        visibility: clean(style.visibility),
        opacity: clean(style.opacity),
        clip: clean(style.clip),
        clip_path: clean(style.clip_path),
        font_size: clean(style.font_size),
        position: clean(style.position),
        left: clean(style.left),
        overflow: clean(style.overflow),
        color: clean(style.color),
        background_color: clean(style.background_color),
    }
}

/// Run the snapshot script in the main world, or in `context_id` when given.
pub async fn capture(
    session: &PageSession,
    context_id: Option<i64>,
    fallback_viewport: Viewport,
) -> Result<Document, CdpError> {
    let value = session
        .evaluate_in_context(SNAPSHOT_SCRIPT, context_id)
        .await?;
    if value.is_null() {
        return Err(CdpError::InvalidResponse(
            "Snapshot script returned no value".to_string(),
        ));
    }
    let snapshot: DocumentSnapshot = serde_json::from_value(value)?;
    Ok(snapshot.into_document(fallback_viewport))
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
