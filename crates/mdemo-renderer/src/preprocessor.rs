//! Demo container preprocessing.
//!
//! First phase of the two-phase pipeline: `:::demo` containers are
//! extracted and replaced with placeholder elements that pass through
//! pulldown-cmark unchanged. The second phase
//! ([`crate::page::PageRenderer`]) substitutes each placeholder with the
//! fully rendered demo.

use mdemo_code::{CodeSample, SampleWarning};
use mdemo_config::DemoOverrides;

use crate::args::DemoArgs;
use crate::fence::{FenceEvent, FenceScanner};

/// One demo extracted from a page.
#[derive(Debug, PartialEq, Eq)]
pub struct ExtractedDemo {
    /// Zero-based index within the page, used to address the placeholder.
    pub index: usize,
    /// Explicit id from the header, if any.
    pub id: Option<String>,
    /// Demo title (empty if none).
    pub title: String,
    /// Extra display classes from the header.
    pub classes: Vec<String>,
    /// Per-demo library overrides.
    pub overrides: DemoOverrides,
    /// The assembled code sample.
    pub sample: CodeSample,
    /// Markdown caption: container lines outside any fence.
    pub caption: String,
    /// Line the container opened on (1-indexed).
    pub line: usize,
}

/// Placeholder element addressing a demo by index.
///
/// The opening tag sits alone on its line so pulldown-cmark treats the
/// element as an HTML block and passes it through verbatim.
#[must_use]
pub fn placeholder(index: usize) -> String {
    format!("<mdemo-demo data-demo=\"{index}\">\n</mdemo-demo>")
}

/// In-progress container state.
#[derive(Debug, Default)]
struct OpenDemo {
    args: DemoArgs,
    line: usize,
    fences: Vec<(String, String)>,
    current_fence: Option<(String, Vec<String>)>,
    caption: Vec<String>,
}

/// Extracts `:::demo` containers and replaces them with placeholders.
///
/// Line-based state machine. Fences are tracked both outside containers
/// (so `:::` inside an ordinary code block stays literal) and inside them
/// (to collect fragment sources). An unclosed container at end of input
/// is closed implicitly with a warning.
#[derive(Debug, Default)]
pub struct DemoPreprocessor {
    fence: FenceScanner,
    open: Option<OpenDemo>,
    demos: Vec<ExtractedDemo>,
    warnings: Vec<String>,
}

impl DemoPreprocessor {
    /// Create a new preprocessor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a page, returning the transformed markdown.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());

        for (idx, line) in input.lines().enumerate() {
            if let Some(replacement) = self.process_line(line, idx + 1) {
                output.push_str(&replacement);
                output.push('\n');
            }
        }

        if self.open.is_some() {
            self.warnings
                .push("unclosed :::demo container at end of input".to_owned());
            let marker = self.close_container();
            output.push_str(&marker);
            output.push('\n');
        }

        output
    }

    /// Warnings generated during processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the preprocessor and return the extracted demos.
    #[must_use]
    pub fn into_demos(self) -> Vec<ExtractedDemo> {
        self.demos
    }

    /// Handle one line. `None` swallows the line (container internals).
    fn process_line(&mut self, line: &str, line_num: usize) -> Option<String> {
        let event = self.fence.observe(line);

        let Some(open) = self.open.as_mut() else {
            // Outside a container: only an un-fenced `:::demo` matters.
            if !self.fence.in_fence()
                && event == FenceEvent::None
                && let Some(header) = demo_open(line)
            {
                self.open = Some(OpenDemo {
                    args: DemoArgs::parse(header),
                    line: line_num,
                    ..OpenDemo::default()
                });
                return None;
            }
            return Some(line.to_owned());
        };

        // Inside a container.
        match event {
            FenceEvent::Opened(info) => {
                let lang = info.split_whitespace().next().unwrap_or("").to_owned();
                open.current_fence = Some((lang, Vec::new()));
            }
            FenceEvent::Closed => {
                if let Some((lang, lines)) = open.current_fence.take() {
                    open.fences.push((lang, lines.join("\n")));
                }
            }
            FenceEvent::None => {
                if let Some((_, lines)) = open.current_fence.as_mut() {
                    lines.push(line.to_owned());
                } else if line.trim() == ":::" {
                    return Some(self.close_container());
                } else if demo_open(line).is_some() {
                    self.warnings.push(format!(
                        "line {line_num}: nested :::demo not supported, treating as caption text"
                    ));
                    open.caption.push(line.to_owned());
                } else {
                    open.caption.push(line.to_owned());
                }
            }
        }
        None
    }

    /// Finish the open container, record the demo, emit its placeholder.
    fn close_container(&mut self) -> String {
        let mut open = self.open.take().unwrap_or_default();

        // A fence left open by truncated input still contributes.
        if let Some((lang, lines)) = open.current_fence.take() {
            open.fences.push((lang, lines.join("\n")));
        }

        let (sample, sample_warnings) = CodeSample::from_fences(open.fences);
        for warning in sample_warnings {
            self.warnings
                .push(format!("line {}: {}", open.line, warning));
        }
        for key in &open.args.unknown_attrs {
            self.warnings.push(format!(
                "line {}: unknown demo attribute '{key}' ignored (valid: js-lib, css-lib)",
                open.line
            ));
        }
        if sample.is_empty() {
            self.warnings.push(format!(
                "line {}: :::demo container holds no recognized code fences",
                open.line
            ));
        }

        let index = self.demos.len();
        tracing::debug!(index, line = open.line, "extracted demo container");
        self.demos.push(ExtractedDemo {
            index,
            id: open.args.id,
            title: open.args.title,
            classes: open.args.classes,
            overrides: open.args.overrides,
            sample,
            caption: open.caption.join("\n").trim().to_owned(),
            line: open.line,
        });

        // Blank lines around the element so pulldown-cmark treats it as
        // an HTML block.
        format!("\n{}\n", placeholder(index))
    }
}

/// Header text of a `:::demo` opening line, if the line is one.
fn demo_open(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix(":::")?;
    let rest = rest.trim_start();
    let header = rest.strip_prefix("demo")?;
    // `:::demonstration` is not a demo container.
    if header.is_empty() || header.starts_with(char::is_whitespace) || header.starts_with('{') {
        Some(header)
    } else {
        None
    }
}
