//! Page rendering pipeline.
//!
//! Ties the phases together: demo extraction, markdown rendering through
//! pulldown-cmark, placeholder substitution, and asset emission. Problems
//! along the way become warnings on the result — a page always renders.

use mdemo_config::Config;
use mdemo_dom::escape_html;
use mdemo_loader::LoaderSession;
use pulldown_cmark::{Options, Parser, html};

use crate::compile::{FragmentCompiler, NativeCompiler};
use crate::demo::{PageAssets, render_demo};
use crate::preprocessor::{DemoPreprocessor, placeholder};

/// Result of rendering a page.
#[derive(Debug)]
pub struct PageResult {
    /// Rendered page content (demos substituted in).
    pub html: String,
    /// Serialized `<link>` elements for the demos' stylesheets.
    pub links_html: String,
    /// Serialized `<script src>` elements for the demos' libraries.
    pub scripts_html: String,
    /// Warnings from all phases, in encounter order.
    pub warnings: Vec<String>,
    /// Number of demos rendered.
    pub demo_count: usize,
}

/// Markdown page renderer with demo enhancement.
pub struct PageRenderer<'a> {
    config: &'a Config,
    compiler: Box<dyn FragmentCompiler>,
}

impl<'a> PageRenderer<'a> {
    /// Create a renderer using the native fragment compiler.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            compiler: Box::new(NativeCompiler),
        }
    }

    /// Replace the fragment compiler.
    #[must_use]
    pub fn with_compiler(mut self, compiler: Box<dyn FragmentCompiler>) -> Self {
        self.compiler = compiler;
        self
    }

    /// Parser options per the render configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.config.render.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render a markdown page to an HTML fragment plus assets.
    #[must_use]
    pub fn render(&self, markdown: &str, session: &mut LoaderSession) -> PageResult {
        let mut preprocessor = DemoPreprocessor::new();
        let transformed = preprocessor.process(markdown);
        let mut warnings = preprocessor.warnings().to_vec();
        let demos = preprocessor.into_demos();

        let mut page_html = String::with_capacity(transformed.len());
        html::push_html(
            &mut page_html,
            Parser::new_ext(&transformed, self.parser_options()),
        );

        let mut assets = PageAssets::new();
        for demo in &demos {
            let rendered = render_demo(
                demo,
                &self.config.demo,
                self.compiler.as_ref(),
                session,
                &mut assets,
            );
            warnings.extend(rendered.warnings);

            let marker = placeholder(demo.index);
            let replaced = page_html.replacen(&marker, &rendered.html, 1);
            if replaced == page_html {
                tracing::warn!(index = demo.index, "demo placeholder missing from rendered page");
                warnings.push(format!(
                    "demo {}: placeholder missing from rendered page, demo appended at end",
                    demo.index
                ));
                page_html.push_str(&rendered.html);
            } else {
                page_html = replaced;
            }
        }

        PageResult {
            html: page_html,
            links_html: assets.links_html(),
            scripts_html: assets.scripts_html(),
            warnings,
            demo_count: demos.len(),
        }
    }

    /// Render a complete standalone HTML document.
    ///
    /// Stylesheet links go in the head; library scripts go at the end of
    /// the body so demo markup exists before they run.
    #[must_use]
    pub fn render_document(
        &self,
        markdown: &str,
        title: &str,
        session: &mut LoaderSession,
    ) -> PageResult {
        let mut result = self.render(markdown, session);
        result.html = format!(
            "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}\n</head>\n<body>\n{}\n{}\n</body>\n</html>\n",
            escape_html(title),
            result.links_html,
            result.html,
            result.scripts_html,
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PAGE: &str = "\
# Demos

Intro text.

:::demo Counter {#counter js-lib=\"https://cdn.example.com/counter.js\"}
A caption line.
```html
<button>+1</button>
```
```js
setup();
```
```css
button { font-weight: bold; }
```
:::

Closing text.
";

    fn render(markdown: &str) -> PageResult {
        let config = Config::default();
        let mut session = LoaderSession::offline();
        PageRenderer::new(&config).render(markdown, &mut session)
    }

    #[test]
    fn test_page_renders_markdown_and_demo() {
        let result = render(PAGE);

        assert!(result.warnings.is_empty());
        assert_eq!(result.demo_count, 1);
        assert!(result.html.contains("<h1>Demos</h1>"));
        assert!(result.html.contains("<p>Intro text.</p>"));
        assert!(result.html.contains("<p>Closing text.</p>"));
        assert!(result.html.contains(r#"id="counter""#));
        assert!(result.html.contains(r#"<template shadowrootmode="open">"#));
        assert!(!result.html.contains("<mdemo-demo"));
    }

    #[test]
    fn test_demo_script_scoped_to_its_display() {
        let result = render(PAGE);
        assert!(result.html.contains(
            "{const document=window.document.querySelector('#counter .mdemo-display').shadowRoot;\nsetup();}"
        ));
    }

    #[test]
    fn test_assets_collected_outside_content() {
        let result = render(PAGE);
        assert_eq!(
            result.scripts_html,
            r#"<script src="https://cdn.example.com/counter.js"></script>"#
        );
        assert_eq!(result.links_html, "");
    }

    #[test]
    fn test_shared_library_fetched_once_across_demos() {
        let markdown = "\
:::demo {js-lib=\"https://cdn.example.com/shared.js\"}
```html
<p>1</p>
```
:::

:::demo {js-lib=\"https://cdn.example.com/shared.js\"}
```html
<p>2</p>
```
:::
";
        let result = render(markdown);
        assert_eq!(result.demo_count, 2);
        assert_eq!(
            result.scripts_html,
            r#"<script src="https://cdn.example.com/shared.js"></script>"#
        );
    }

    #[test]
    fn test_page_without_demos() {
        let result = render("# Just markdown\n");
        assert_eq!(result.demo_count, 0);
        assert_eq!(result.scripts_html, "");
        assert!(result.html.contains("<h1>Just markdown</h1>"));
    }

    #[test]
    fn test_gfm_tables_honored_by_config() {
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |\n";

        let gfm = render(markdown);
        assert!(gfm.html.contains("<table>"));

        let mut config = Config::default();
        config.render.gfm = false;
        let mut session = LoaderSession::offline();
        let plain = PageRenderer::new(&config).render(markdown, &mut session);
        assert!(!plain.html.contains("<table>"));
    }

    #[test]
    fn test_render_document_shell() {
        let config = Config::default();
        let mut session = LoaderSession::offline();
        let result =
            PageRenderer::new(&config).render_document(PAGE, "Demo <Page>", &mut session);

        assert!(result.html.starts_with("<!doctype html>"));
        assert!(result.html.contains("<title>Demo &lt;Page&gt;</title>"));
        // Scripts come after the content, before </body>.
        let content_pos = result.html.find(r#"id="counter""#).unwrap();
        let script_pos = result.html.find("counter.js").unwrap();
        assert!(script_pos > content_pos);
    }

    #[test]
    fn test_warnings_propagate_from_all_phases() {
        let markdown = "\
:::demo
```python
print('hi')
```
```scss
p { color: red; }
```
:::
";
        let result = render(markdown);
        assert!(result.warnings.iter().any(|w| w.contains("python")));
        assert!(result.warnings.iter().any(|w| w.contains("scss")));
    }
}
