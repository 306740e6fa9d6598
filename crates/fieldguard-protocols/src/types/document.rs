//! Document tree snapshot.
//!
//! A [`Document`] is an arena of element nodes in document order. Parent links
//! are plain indices: they are only ever read for traversal, never mutated by
//! the engine, and a malformed link (out of range, or a cycle) is tolerated by
//! every walker in this module.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::style::{Geometry, RawStyle, Viewport};

/// Tags whose elements can carry user-entered values.
pub const INPUT_LIKE_TAGS: [&str; 3] = ["input", "textarea", "select"];

/// Index of an element inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Element payload as captured by a document provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub style: RawStyle,
    /// `None` when the provider has no layout information.
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_style(mut self, style: RawStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    data: ElementData,
    parent: Option<NodeId>,
}

/// A nested browsing context discovered inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRef {
    /// Provider-specific frame identifier.
    pub id: String,
    pub url: String,
}

impl FrameRef {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }

    /// Location tag used on findings from this frame.
    pub fn location_tag(&self) -> String {
        format!("iframe({})", self.url)
    }
}

/// Location tag for findings from the top-level document.
pub const MAIN_PAGE_LOCATION: &str = "main page";

/// Snapshot of one document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    url: String,
    nodes: Vec<Node>,
    frames: Vec<FrameRef>,
    viewport: Viewport,
}

impl Document {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append an element. Elements must be pushed in document order.
    pub fn push(&mut self, parent: Option<NodeId>, data: ElementData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { data, parent });
        id
    }

    /// Re-link a node. Used by providers whose snapshots reference parents by
    /// index, which may arrive out of order.
    pub fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.parent = parent;
        }
    }

    pub fn add_frame(&mut self, frame: FrameRef) {
        self.frames.push(frame);
    }

    /// Frames declared or discovered in this document, in discovery order.
    pub fn frames(&self) -> &[FrameRef] {
        &self.frames
    }

    pub fn get(&self, id: NodeId) -> Option<ElementRef<'_>> {
        (id.0 < self.nodes.len()).then_some(ElementRef { doc: self, id })
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        (0..self.nodes.len()).map(move |i| ElementRef {
            doc: self,
            id: NodeId(i),
        })
    }

    /// `input`, `textarea` and `select` elements in document order.
    pub fn input_like(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.elements().filter(|e| e.is_input_like())
    }

    /// Forms in document order, each with the input-like elements it owns.
    ///
    /// An element is owned by its closest `form` ancestor.
    pub fn forms(&self) -> Vec<FormView<'_>> {
        let mut forms: Vec<FormView<'_>> = self
            .elements()
            .filter(|e| e.tag() == "form")
            .map(|form| FormView {
                form,
                fields: Vec::new(),
            })
            .collect();
        let index: HashMap<NodeId, usize> = forms
            .iter()
            .enumerate()
            .map(|(i, f)| (f.form.id(), i))
            .collect();

        for field in self.input_like() {
            if let Some(owner) = field.closest_form() {
                if let Some(&i) = index.get(&owner.id()) {
                    forms[i].fields.push(field);
                }
            }
        }
        forms
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes
            .get(id.0)
            .and_then(|n| n.parent)
            .filter(|p| p.0 < self.nodes.len())
    }
}

/// Borrowed handle to one element of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> ElementRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn data(&self) -> &'a ElementData {
        &self.doc.nodes[self.id.0].data
    }

    pub fn tag(&self) -> &'a str {
        &self.data().tag
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.data().attributes.get(name).map(String::as_str)
    }

    pub fn parent(&self) -> Option<ElementRef<'a>> {
        self.doc.parent_of(self.id).map(|id| ElementRef { doc: self.doc, id })
    }

    pub fn is_input_like(&self) -> bool {
        INPUT_LIKE_TAGS.contains(&self.tag())
    }

    /// Declared input type, lowercased, defaulting to `"text"`.
    pub fn input_type(&self) -> String {
        self.attr("type")
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "text".to_string())
    }

    /// True for `<input type="hidden">`.
    pub fn is_explicit_hidden_input(&self) -> bool {
        self.tag() == "input" && self.input_type() == "hidden"
    }

    /// Closest `form` ancestor. Stops on a cyclic parent chain.
    pub fn closest_form(&self) -> Option<ElementRef<'a>> {
        let mut seen = HashSet::from([self.id]);
        let mut current = self.parent();
        while let Some(el) = current {
            if !seen.insert(el.id) {
                return None;
            }
            if el.tag() == "form" {
                return Some(el);
            }
            current = el.parent();
        }
        None
    }

    /// Serialize the opening tag, e.g. `<input name="cc" type="text">`.
    pub fn open_tag(&self) -> String {
        let mut out = format!("<{}", self.tag());
        for (name, value) in &self.data().attributes {
            if value.is_empty() {
                out.push_str(&format!(" {}", name));
            } else {
                out.push_str(&format!(" {}=\"{}\"", name, value.replace('"', "&quot;")));
            }
        }
        out.push('>');
        out
    }
}

/// A form together with the input-like elements it owns.
#[derive(Debug, Clone)]
pub struct FormView<'a> {
    pub form: ElementRef<'a>,
    pub fields: Vec<ElementRef<'a>>,
}

impl<'a> FormView<'a> {
    /// The form's `action` attribute, if present and non-empty.
    pub fn action(&self) -> Option<&'a str> {
        self.form.attr("action").filter(|a| !a.trim().is_empty())
    }
}
