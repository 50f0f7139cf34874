//! Code demo rendering for markdown pages.
//!
//! This crate turns `:::demo` containers in markdown into interactive,
//! isolated code demos in the rendered HTML:
//!
//! 1. **Preprocessing** ([`DemoPreprocessor`]): containers are extracted
//!    and replaced with placeholder elements that pass through
//!    pulldown-cmark unchanged.
//! 2. **Demo rendering** ([`render_demo`]): fragments are classified and
//!    compiled, libraries are routed through the loader session, and the
//!    compiled style/script are injected exactly once into the demo's
//!    isolated [`DemoRoot`](mdemo_dom::DemoRoot).
//! 3. **Post-processing** ([`PageRenderer`]): placeholders are substituted
//!    with the rendered demos and page assets are emitted.
//!
//! # Example
//!
//! ```
//! use mdemo_config::Config;
//! use mdemo_loader::LoaderSession;
//! use mdemo_renderer::PageRenderer;
//!
//! let markdown = ":::demo Greeting\n```html\n<p>hello</p>\n```\n:::\n";
//!
//! let config = Config::default();
//! let mut session = LoaderSession::offline();
//! let result = PageRenderer::new(&config).render(markdown, &mut session);
//! assert_eq!(result.demo_count, 1);
//! ```

mod args;
mod compile;
mod demo;
mod fence;
mod inject;
mod page;
mod preprocessor;

pub use args::DemoArgs;
pub use compile::{FragmentCompiler, NativeCompiler};
pub use demo::{PageAssets, RenderedDemo, render_demo};
pub use inject::{DISPLAY_CLASS, inject_script, inject_style};
pub use page::{PageRenderer, PageResult};
pub use preprocessor::{DemoPreprocessor, ExtractedDemo, placeholder};
