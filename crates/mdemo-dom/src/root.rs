//! The isolated demo rendering root.

use crate::node::{Element, Node};

/// Isolated rendering boundary for one demo instance.
///
/// Owns the nodes rendered inside the demo's display element. Serializes
/// as a declarative shadow root (`<template shadowrootmode="open">`) so
/// injected style and script stay scoped to the demo and page-level CSS
/// cannot reach in.
///
/// Injection guards query this root via [`has_element`](Self::has_element):
/// a root that already contains a `<style>` (or `<script>`) among its
/// direct children must not receive a second one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoRoot {
    children: Vec<Node>,
}

impl DemoRoot {
    /// Create an empty root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any direct child is an element with the given tag.
    #[must_use]
    pub fn has_element(&self, tag: &str) -> bool {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .any(|el| el.is(tag))
    }

    /// Append a child node.
    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Direct children.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of direct children with the given tag.
    #[must_use]
    pub fn count_elements(&self, tag: &str) -> usize {
        self.children
            .iter()
            .filter_map(Node::as_element)
            .filter(|el| el.is(tag))
            .count()
    }

    /// Serialize the root into `out` as a declarative shadow boundary.
    pub fn write_html(&self, out: &mut String) {
        out.push_str(r#"<template shadowrootmode="open">"#);
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</template>");
    }

    /// Serialize the root to a new string.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

impl From<DemoRoot> for Node {
    fn from(root: DemoRoot) -> Self {
        Self::Raw(root.to_html())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_root_has_no_elements() {
        let root = DemoRoot::new();
        assert!(!root.has_element("style"));
        assert!(!root.has_element("script"));
        assert_eq!(root.count_elements("style"), 0);
    }

    #[test]
    fn test_presence_check_by_tag() {
        let mut root = DemoRoot::new();
        root.append(Element::new("style").with_text("p { margin: 0; }"));

        assert!(root.has_element("style"));
        assert!(!root.has_element("script"));
    }

    #[test]
    fn test_text_children_do_not_count_as_elements() {
        let mut root = DemoRoot::new();
        root.append(Node::text("style"));
        assert!(!root.has_element("style"));
    }

    #[test]
    fn test_shadow_boundary_serialization() {
        let mut root = DemoRoot::new();
        root.append(Element::new("style").with_text("p { color: red; }"));
        root.append(Node::raw("<p>demo</p>"));

        assert_eq!(
            root.to_html(),
            r#"<template shadowrootmode="open"><style>p { color: red; }</style><p>demo</p></template>"#
        );
    }

    #[test]
    fn test_count_elements() {
        let mut root = DemoRoot::new();
        root.append(Element::new("style"));
        root.append(Element::new("script"));
        assert_eq!(root.count_elements("style"), 1);
        assert_eq!(root.count_elements("script"), 1);
    }
}
