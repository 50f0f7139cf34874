//! Rendering of one extracted demo.

use mdemo_code::{CodeSample, FragmentKind, content_id, preprocessor_for};
use mdemo_config::DemoOptions;
use mdemo_dom::{Attr, DemoRoot, Element, Node};
use mdemo_loader::{LoadState, LoaderSession};
use pulldown_cmark::{Parser, html};

use crate::compile::FragmentCompiler;
use crate::inject::{DISPLAY_CLASS, inject_script, inject_style};
use crate::preprocessor::ExtractedDemo;

/// Page-level assets collected while rendering demos.
///
/// Stylesheet links are deduplicated here by URL; script elements are
/// appended by the loader session, which enforces its own at-most-once
/// guarantee.
#[derive(Debug, Default)]
pub struct PageAssets {
    links: Vec<Node>,
    scripts: Vec<Node>,
}

impl PageAssets {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stylesheet link unless one for `url` exists already.
    pub fn ensure_stylesheet(&mut self, url: &str) {
        let present = self
            .links
            .iter()
            .filter_map(Node::as_element)
            .any(|el| el.attr("href") == Some(url));
        if !present {
            self.links.push(Element::stylesheet(url).into());
        }
    }

    /// The script element list the loader appends into.
    pub fn scripts_mut(&mut self) -> &mut Vec<Node> {
        &mut self.scripts
    }

    /// Serialized `<link>` elements.
    #[must_use]
    pub fn links_html(&self) -> String {
        let mut out = String::new();
        for node in &self.links {
            node.write_html(&mut out);
        }
        out
    }

    /// Serialized `<script src>` elements.
    #[must_use]
    pub fn scripts_html(&self) -> String {
        let mut out = String::new();
        for node in &self.scripts {
            node.write_html(&mut out);
        }
        out
    }

    /// Number of stylesheet links collected.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of script elements collected.
    #[must_use]
    pub fn script_count(&self) -> usize {
        self.scripts.len()
    }
}

/// Output of rendering one demo.
#[derive(Debug)]
pub struct RenderedDemo {
    /// The demo's HTML shell.
    pub html: String,
    /// Warnings produced while rendering this demo.
    pub warnings: Vec<String>,
}

/// Render one demo into its HTML shell.
///
/// Merges the page defaults with the demo's overrides, routes the merged
/// libraries through the loader and asset collection, compiles fragments,
/// performs the style/script injections into a fresh rendering root, and
/// assembles the surrounding shell (display element, code panels,
/// caption).
pub fn render_demo(
    demo: &ExtractedDemo,
    defaults: &DemoOptions,
    compiler: &dyn FragmentCompiler,
    session: &mut LoaderSession,
    assets: &mut PageAssets,
) -> RenderedDemo {
    let mut warnings = Vec::new();
    let merged = defaults.merged_with(&demo.overrides);

    for url in &merged.js_lib {
        let handle = session.ensure_script(assets.scripts_mut(), url);
        if let LoadState::Failed(e) = handle.state() {
            warnings.push(format!("demo {}: {e}", demo.index));
        }
    }
    for url in &merged.css_lib {
        assets.ensure_stylesheet(url);
    }

    let id = demo
        .id
        .clone()
        .unwrap_or_else(|| content_id(&demo.sample));

    let mut root = DemoRoot::new();

    if let Some(markup) = compiled_fragment(demo, FragmentKind::Markup, compiler, &mut warnings) {
        root.append(Node::raw(markup));
    }
    if let Some(css) = compiled_fragment(demo, FragmentKind::Style, compiler, &mut warnings) {
        inject_style(&mut root, &css);
    }
    if let Some(js) = compiled_fragment(demo, FragmentKind::Script, compiler, &mut warnings) {
        // Wrap the executable script in a sample so injection goes
        // through the script accessor.
        let (executable, _) = CodeSample::from_fences([("js", js)]);
        inject_script(&id, &mut root, &executable);
    }

    let html = shell(demo, &id, &root);
    RenderedDemo { html, warnings }
}

/// Compile one fragment of the demo, if present and compilable.
fn compiled_fragment(
    demo: &ExtractedDemo,
    kind: FragmentKind,
    compiler: &dyn FragmentCompiler,
    warnings: &mut Vec<String>,
) -> Option<String> {
    let fragment = demo.sample.fragment(kind)?;
    let preprocessor = preprocessor_for(kind, &fragment.lang);
    let compiled = compiler.compile(kind, preprocessor, &fragment.text);
    if compiled.is_none() {
        warnings.push(format!(
            "demo {}: no compiler for '{preprocessor}' ({:?} fragment), source shown in code panel only",
            demo.index, kind
        ));
    }
    compiled
}

/// Assemble the demo shell around the rendering root.
fn shell(demo: &ExtractedDemo, id: &str, root: &DemoRoot) -> String {
    let mut class = String::from("mdemo");
    for extra in &demo.classes {
        class.push(' ');
        class.push_str(extra);
    }

    let mut container = Element::new("div")
        .with_attr(Attr::id(id))
        .with_attr(Attr::class(class))
        .with_attr(Attr::data("demo", demo.index.to_string()));

    container.append(
        Element::new("div")
            .with_attr(Attr::class(DISPLAY_CLASS))
            .with_child(Node::raw(root.to_html())),
    );

    let summary = if demo.title.is_empty() {
        "Code"
    } else {
        demo.title.as_str()
    };
    let mut details = Element::new("details")
        .with_attr(Attr::class("mdemo-code"))
        .with_child(Element::new("summary").with_text(summary));
    for (kind, fragment) in demo.sample.fragments() {
        let code = Element::new("code")
            .with_attr(Attr::class(format!("language-{}", fragment.lang)))
            .with_attr(Attr::data(
                "preprocessor",
                preprocessor_for(kind, &fragment.lang),
            ))
            .with_text(&fragment.text);
        details.append(Element::new("pre").with_child(code));
    }
    container.append(details);

    if !demo.caption.is_empty() {
        let mut caption_html = String::new();
        html::push_html(&mut caption_html, Parser::new(&demo.caption));
        container.append(
            Element::new("div")
                .with_attr(Attr::class("mdemo-caption"))
                .with_child(Node::raw(caption_html)),
        );
    }

    container.to_html()
}

#[cfg(test)]
mod tests {
    use mdemo_config::DemoOverrides;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::compile::NativeCompiler;

    fn demo_from(fences: &[(&str, &str)]) -> ExtractedDemo {
        let (sample, _) = CodeSample::from_fences(fences.iter().copied());
        ExtractedDemo {
            index: 0,
            id: None,
            title: String::new(),
            classes: Vec::new(),
            overrides: DemoOverrides::default(),
            sample,
            caption: String::new(),
            line: 1,
        }
    }

    fn render(demo: &ExtractedDemo, defaults: &DemoOptions) -> (RenderedDemo, PageAssets) {
        let mut session = LoaderSession::offline();
        let mut assets = PageAssets::new();
        let rendered = render_demo(demo, defaults, &NativeCompiler, &mut session, &mut assets);
        (rendered, assets)
    }

    #[test]
    fn test_full_demo_shell() {
        let demo = demo_from(&[
            ("html", "<button>+1</button>"),
            ("js", "count();"),
            ("css", "button { color: red; }"),
        ]);
        let (rendered, _) = render(&demo, &DemoOptions::default());

        assert!(rendered.warnings.is_empty());
        let html = &rendered.html;
        assert!(html.contains(r#"class="mdemo""#));
        assert!(html.contains(r#"class="mdemo-display""#));
        assert!(html.contains(r#"<template shadowrootmode="open">"#));
        assert!(html.contains("<button>+1</button>"));
        assert!(html.contains("<style>button { color: red; }</style>"));
        assert!(html.contains(".mdemo-display').shadowRoot;\ncount();}"));
        // Code panels carry escaped source.
        assert!(html.contains(r#"<code class="language-html""#));
        assert!(html.contains("&lt;button&gt;+1&lt;/button&gt;"));
    }

    #[test]
    fn test_content_hash_id_when_none_given() {
        let demo = demo_from(&[("html", "<p>x</p>")]);
        let (rendered, _) = render(&demo, &DemoOptions::default());
        assert!(rendered.html.contains(r#"id="demo-"#));
    }

    #[test]
    fn test_explicit_id_wins() {
        let mut demo = demo_from(&[("html", "<p>x</p>")]);
        demo.id = Some("my-demo".to_owned());
        let (rendered, _) = render(&demo, &DemoOptions::default());
        assert!(rendered.html.contains(r#"id="my-demo""#));
    }

    #[test]
    fn test_uncompilable_fragment_warns_but_renders_panel() {
        let demo = demo_from(&[("scss", "p { .x { color: red; } }")]);
        let (rendered, _) = render(&demo, &DemoOptions::default());

        assert_eq!(rendered.warnings.len(), 1);
        assert!(rendered.warnings[0].contains("scss"));
        // No style injected, but the source is in the code panel.
        assert!(!rendered.html.contains("<style>"));
        assert!(rendered.html.contains(r#"data-preprocessor="scss""#));
    }

    #[test]
    fn test_libraries_merged_and_collected() {
        let mut demo = demo_from(&[("html", "<p>x</p>")]);
        demo.overrides = DemoOverrides {
            js_lib: vec!["https://b.js".to_owned(), "https://a.js".to_owned()],
            css_lib: vec!["https://c.css".to_owned()],
        };
        let defaults = DemoOptions {
            js_lib: vec!["https://a.js".to_owned()],
            css_lib: vec!["https://c.css".to_owned()],
        };
        let (_, assets) = render(&demo, &defaults);

        // Union semantics: a.js once, b.js once, c.css once.
        assert_eq!(assets.script_count(), 2);
        assert_eq!(assets.link_count(), 1);
        assert!(assets.scripts_html().contains("https://a.js"));
        assert!(assets.scripts_html().contains("https://b.js"));
        assert_eq!(
            assets.links_html(),
            r#"<link rel="stylesheet" href="https://c.css">"#
        );
    }

    #[test]
    fn test_shared_session_dedupes_across_demos() {
        let defaults = DemoOptions {
            js_lib: vec!["https://shared.js".to_owned()],
            css_lib: Vec::new(),
        };
        let first = demo_from(&[("html", "<p>1</p>")]);
        let second = demo_from(&[("html", "<p>2</p>")]);

        let mut session = LoaderSession::offline();
        let mut assets = PageAssets::new();
        render_demo(&first, &defaults, &NativeCompiler, &mut session, &mut assets);
        render_demo(&second, &defaults, &NativeCompiler, &mut session, &mut assets);

        assert_eq!(assets.script_count(), 1);
    }

    #[test]
    fn test_caption_rendered_as_markdown() {
        let mut demo = demo_from(&[("html", "<p>x</p>")]);
        demo.caption = "Uses **bold** text.".to_owned();
        let (rendered, _) = render(&demo, &DemoOptions::default());
        assert!(rendered.html.contains(r#"class="mdemo-caption""#));
        assert!(rendered.html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_markdown_markup_fragment_compiled() {
        let demo = demo_from(&[("md", "# Hello")]);
        let (rendered, _) = render(&demo, &DemoOptions::default());
        assert!(rendered.html.contains("<h1>Hello</h1>"));
    }
}
