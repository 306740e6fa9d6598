//! Markup to [`Document`] conversion.

use std::collections::HashMap;

use scraper::{Html, Node};
use url::Url;

use fieldguard_protocols::{Document, ElementData, FrameRef, NodeId, RawStyle};

const FRAME_TAGS: [&str; 2] = ["iframe", "frame"];

/// Parse `html` into a document. Relative frame sources resolve against `base`.
///
/// Styles are read from inline `style` attributes. The boolean `hidden`
/// attribute counts as `display: none` unless the inline style sets `display`.
pub fn parse_html(html: &str, base: &Url) -> Document {
    let parsed = Html::parse_document(html);
    let mut doc = Document::new(base.as_str());
    let mut ids = HashMap::new();

    for node in parsed.tree.root().descendants() {
        let Node::Element(element) = node.value() else {
            continue;
        };

        let parent = node
            .ancestors()
            .find(|a| a.value().is_element())
            .and_then(|a| ids.get(&a.id()).copied());

        let mut data = ElementData::new(element.name());
        for (name, value) in element.attrs() {
            data = data.with_attr(name, value);
        }
        let mut style = element
            .attr("style")
            .map(RawStyle::from_inline)
            .unwrap_or_default();
        if style.display.is_none() && element.attr("hidden").is_some() {
            style.display = Some("none".to_string());
        }
        let data = data.with_style(style);

        let id: NodeId = doc.push(parent, data);
        ids.insert(node.id(), id);

        if FRAME_TAGS.contains(&element.name()) {
            if let Some(url) = element.attr("src").and_then(|src| frame_url(base, src)) {
                let frame_id = format!("frame-{}", doc.frames().len());
                doc.add_frame(FrameRef::new(frame_id, url.as_str()));
            }
        }
    }
    doc
}

/// Resolve a frame `src`. Only http(s) targets can be fetched.
fn frame_url(base: &Url, src: &str) -> Option<Url> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }
    base.join(src)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
