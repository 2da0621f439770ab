// src/ui/dom.rs

//! A minimal element tree.
//!
//! Just enough DOM for the binder: tags, ids, classes, two text sources and
//! parent/child links, stored in an arena indexed by [`ElementId`]. The
//! rendered page owns the real thing; this is the shape the binder and the
//! selector engine operate against.

use std::fmt;

/// Index of an element within its [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// An element to be inserted into a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text_content: Option<String>,
    pub inner_text: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text_content(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    pub fn with_inner_text(mut self, text: impl Into<String>) -> Self {
        self.inner_text = Some(text.into());
        self
    }
}

struct Node {
    element: Element,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// Arena of elements in document order.
#[derive(Default)]
pub struct Document {
    nodes: Vec<Node>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.nodes.len())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent` (or as a root) and return its id.
    ///
    /// Elements are appended in document order; iteration and query results
    /// follow insertion order.
    pub fn append(&mut self, parent: Option<ElementId>, element: Element) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            element,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub fn get(&self, id: ElementId) -> &Element {
        &self.nodes[id.0].element
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.nodes[id.0].children
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.nodes.len()).map(ElementId)
    }

    /// The element and its ancestors, nearest first, element included.
    pub fn ancestors_inclusive(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let mut current = Some(id);
        std::iter::from_fn(move || {
            let id = current?;
            current = self.parent(id);
            Some(id)
        })
    }

    /// The element's effective text.
    ///
    /// Falls through `text_content`, then `inner_text`, then the collected
    /// text of its descendants, and defaults to the empty string when no text
    /// source is available.
    pub fn effective_text(&self, id: ElementId) -> String {
        let element = self.get(id);
        if let Some(text) = &element.text_content {
            return text.clone();
        }
        if let Some(text) = &element.inner_text {
            return text.clone();
        }

        let mut collected = String::new();
        self.collect_descendant_text(id, &mut collected);
        collected
    }

    fn collect_descendant_text(&self, id: ElementId, out: &mut String) {
        for &child in self.children(id) {
            let element = self.get(child);
            if let Some(text) = element.text_content.as_ref().or(element.inner_text.as_ref()) {
                out.push_str(text);
            } else {
                self.collect_descendant_text(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_text_prefers_text_content() {
        let mut doc = Document::new();
        let el = doc.append(
            None,
            Element::new("div")
                .with_text_content("primary")
                .with_inner_text("secondary"),
        );
        assert_eq!(doc.effective_text(el), "primary");
    }

    #[test]
    fn effective_text_falls_back_to_inner_text() {
        let mut doc = Document::new();
        let el = doc.append(None, Element::new("div").with_inner_text("secondary"));
        assert_eq!(doc.effective_text(el), "secondary");
    }

    #[test]
    fn effective_text_collects_from_descendants() {
        let mut doc = Document::new();
        let root = doc.append(None, Element::new("div"));
        let row = doc.append(Some(root), Element::new("span"));
        doc.append(Some(row), Element::new("b").with_text_content("Hello "));
        doc.append(Some(root), Element::new("i").with_text_content("World"));
        assert_eq!(doc.effective_text(root), "Hello World");
    }

    #[test]
    fn effective_text_defaults_to_empty() {
        let mut doc = Document::new();
        let el = doc.append(None, Element::new("div"));
        assert_eq!(doc.effective_text(el), "");
    }

    #[test]
    fn ancestors_walk_nearest_first() {
        let mut doc = Document::new();
        let a = doc.append(None, Element::new("div"));
        let b = doc.append(Some(a), Element::new("div"));
        let c = doc.append(Some(b), Element::new("i"));
        let chain: Vec<_> = doc.ancestors_inclusive(c).collect();
        assert_eq!(chain, vec![c, b, a]);
    }
}
