//! HTML nodes and serialization.

use std::fmt::Write;

use crate::attr::Attr;

/// Element tags serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "link", "meta"];

/// Element tags whose text children are written without escaping.
///
/// Per the HTML parsing rules `<script>` and `<style>` contents are raw
/// text; escaping them would corrupt the embedded code.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// A node in the demo output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// A text node, escaped on serialization.
    Text(String),
    /// Pre-rendered HTML inserted verbatim (e.g. compiled markdown).
    Raw(String),
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create a raw HTML node.
    #[must_use]
    pub fn raw(value: impl Into<String>) -> Self {
        Self::Raw(value.into())
    }

    /// The element inside this node, if it is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) | Self::Raw(_) => None,
        }
    }

    /// Serialize this node into `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Element(el) => el.write_html(out),
            Self::Text(text) => out.push_str(&escape_html(text)),
            Self::Raw(html) => out.push_str(html),
        }
    }
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<Attr>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a `<script src="…">` element.
    #[must_use]
    pub fn script_src(url: impl Into<String>) -> Self {
        Self::new("script").with_attr(Attr::src(url))
    }

    /// Create a `<link rel="stylesheet" href="…">` element.
    #[must_use]
    pub fn stylesheet(url: impl Into<String>) -> Self {
        Self::new("link")
            .with_attr(Attr::Rel("stylesheet".to_owned()))
            .with_attr(Attr::Href(url.into()))
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, attr: Attr) -> Self {
        self.attrs.push(attr);
        self
    }

    /// Add a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Add a text child.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::text(text))
    }

    /// Append a child node in place.
    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Element tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether this element has the given tag.
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Value of an attribute by serialized name, if set.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name() == name)
            .map(Attr::value)
    }

    /// Direct children.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Serialize this element into `out`.
    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for attr in &self.attrs {
            write!(out, r#" {}="{}""#, attr.name(), escape_attr(attr.value())).unwrap();
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        let raw_text = RAW_TEXT_TAGS.contains(&self.tag.as_str());
        for child in &self.children {
            match child {
                Node::Text(text) if raw_text => out.push_str(text),
                other => other.write_html(out),
            }
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    /// Serialize this element to a new string.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

/// Escape text content for HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value for double-quoted serialization.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    escape_html(value).replace('"', "&quot;")
}
