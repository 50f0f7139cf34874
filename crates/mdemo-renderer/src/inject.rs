//! Style and script injection into a demo's rendering root.
//!
//! Both injections are idempotent by presence check: a root that already
//! holds an element of the injected kind among its direct children is
//! left untouched, whatever the arguments. The renderer may run more than
//! once for the same displayed demo (content updates), and stacked
//! stylesheets or re-executed scripts must not result. Style and script
//! injection are independent; call them in either order.

use mdemo_code::CodeSample;
use mdemo_dom::{DemoRoot, Element};

/// CSS class of the display element the script preamble queries.
pub const DISPLAY_CLASS: &str = "mdemo-display";

/// Inject CSS into the root unless a `<style>` child already exists.
pub fn inject_style(root: &mut DemoRoot, css: &str) {
    if !css.is_empty() && !root.has_element("style") {
        root.append(Element::new("style").with_text(css));
    }
}

/// Inject the sample's script into the root unless a `<script>` child
/// already exists.
///
/// The script text is wrapped in an isolation preamble that rebinds
/// `document` — as seen by the injected code — to the shadow root of the
/// demo's display element, addressed through the demo id. Without it the
/// script would query the top-level page and miss the demo's own markup.
pub fn inject_script(id: &str, root: &mut DemoRoot, sample: &CodeSample) {
    let Some(script_text) = sample.script_text() else {
        return;
    };

    if !script_text.is_empty() && !root.has_element("script") {
        let wrapped = format!(
            "{{const document=window.document.querySelector('#{id} .{DISPLAY_CLASS}').shadowRoot;\n{script_text}}}"
        );
        root.append(Element::new("script").with_text(wrapped));
    }
}

#[cfg(test)]
mod tests {
    use mdemo_dom::Node;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_with_script(text: &str) -> CodeSample {
        let (sample, _) = CodeSample::from_fences([("js", text)]);
        sample
    }

    fn script_body(root: &DemoRoot) -> String {
        let element = root
            .children()
            .iter()
            .filter_map(Node::as_element)
            .find(|el| el.is("script"))
            .expect("script element present");
        let mut out = element.to_html();
        out.truncate(out.len() - "</script>".len());
        out.split_off("<script>".len())
    }

    #[test]
    fn test_style_injected_once() {
        let mut root = DemoRoot::new();

        inject_style(&mut root, ".btn { color: red; }");
        inject_style(&mut root, ".btn { color: blue; }");

        assert_eq!(root.count_elements("style"), 1);
        assert!(root.to_html().contains("color: red"));
        assert!(!root.to_html().contains("color: blue"));
    }

    #[test]
    fn test_empty_css_injects_nothing() {
        let mut root = DemoRoot::new();
        inject_style(&mut root, "");
        assert_eq!(root.count_elements("style"), 0);
    }

    #[test]
    fn test_script_injected_once_with_preamble() {
        let mut root = DemoRoot::new();
        let sample = sample_with_script("document.querySelector('button').click();");

        inject_script("demo-abc123", &mut root, &sample);
        inject_script("demo-abc123", &mut root, &sample);

        assert_eq!(root.count_elements("script"), 1);
        let body = script_body(&root);
        assert!(body.starts_with(
            "{const document=window.document.querySelector('#demo-abc123 .mdemo-display').shadowRoot;"
        ));
        assert!(body.contains("document.querySelector('button').click();"));
        assert!(body.ends_with('}'));
    }

    #[test]
    fn test_sample_without_script_injects_nothing() {
        let mut root = DemoRoot::new();
        let (sample, _) = CodeSample::from_fences([("html", "<p>hi</p>")]);

        inject_script("demo-x", &mut root, &sample);
        assert_eq!(root.count_elements("script"), 0);
    }

    #[test]
    fn test_injections_are_order_independent() {
        let sample = sample_with_script("go();");

        let mut style_first = DemoRoot::new();
        inject_style(&mut style_first, "p{}");
        inject_script("d", &mut style_first, &sample);

        let mut script_first = DemoRoot::new();
        inject_script("d", &mut script_first, &sample);
        inject_style(&mut script_first, "p{}");

        assert_eq!(style_first.count_elements("style"), 1);
        assert_eq!(style_first.count_elements("script"), 1);
        assert_eq!(script_first.count_elements("style"), 1);
        assert_eq!(script_first.count_elements("script"), 1);
    }

    #[test]
    fn test_existing_script_blocks_reinjection_of_different_sample() {
        let mut root = DemoRoot::new();
        inject_script("d", &mut root, &sample_with_script("first();"));
        inject_script("d", &mut root, &sample_with_script("second();"));

        let html = root.to_html();
        assert!(html.contains("first();"));
        assert!(!html.contains("second();"));
    }
}
