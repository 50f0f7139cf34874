//! Minimal HTML node model for demo rendering.
//!
//! This crate provides the building blocks the demo renderer assembles its
//! output from:
//! - [`Element`] / [`Node`]: a small HTML tree with serialization
//! - [`Attr`]: an enumerated, typed attribute set (no string-keyed
//!   property assignment)
//! - [`DemoRoot`]: the isolated rendering boundary a demo's style and
//!   script are injected into
//!
//! Serialization escapes text and attribute values; `<script>` and
//! `<style>` contents are written raw, matching HTML raw-text element
//! rules.

mod attr;
mod node;
mod root;

pub use attr::Attr;
pub use node::{Element, Node, escape_attr, escape_html};
pub use root::DemoRoot;
