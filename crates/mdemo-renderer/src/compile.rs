//! Fragment compilation seam.
//!
//! Turning a `(preprocessor identifier, source)` pair into executable
//! markup/script/CSS is the job of an external compiler service. This
//! module defines the seam and a native implementation covering the
//! identifiers that need no external tooling: `none` (already executable)
//! and `markdown`.

use mdemo_code::FragmentKind;
use pulldown_cmark::{Parser, html};

/// Compiles one demo fragment.
///
/// Returns `None` when this compiler does not handle the identifier; the
/// caller skips the fragment's display output (its source still shows in
/// the code panel) and records a warning.
pub trait FragmentCompiler {
    /// Compile `source` classified as `preprocessor` for the given kind.
    fn compile(&self, kind: FragmentKind, preprocessor: &str, source: &str) -> Option<String>;
}

/// Compiler for identifiers that need no external service.
#[derive(Debug, Default)]
pub struct NativeCompiler;

impl FragmentCompiler for NativeCompiler {
    fn compile(&self, _kind: FragmentKind, preprocessor: &str, source: &str) -> Option<String> {
        match preprocessor {
            "none" => Some(source.to_owned()),
            "markdown" => {
                let mut out = String::with_capacity(source.len());
                html::push_html(&mut out, Parser::new(source));
                Some(out)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_none_passes_source_through() {
        let compiler = NativeCompiler;
        assert_eq!(
            compiler.compile(FragmentKind::Markup, "none", "<p>hi</p>"),
            Some("<p>hi</p>".to_owned())
        );
        assert_eq!(
            compiler.compile(FragmentKind::Script, "none", "run();"),
            Some("run();".to_owned())
        );
    }

    #[test]
    fn test_markdown_compiles_to_html() {
        let compiler = NativeCompiler;
        let out = compiler
            .compile(FragmentKind::Markup, "markdown", "**bold**")
            .unwrap();
        assert_eq!(out.trim(), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn test_unsupported_identifier_is_none() {
        let compiler = NativeCompiler;
        assert_eq!(compiler.compile(FragmentKind::Style, "stylus", "p\n  color red"), None);
        assert_eq!(compiler.compile(FragmentKind::Script, "typescript", "let x: number;"), None);
    }
}
