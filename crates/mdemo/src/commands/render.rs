//! The `render` command.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use mdemo_config::{CliSettings, Config};
use mdemo_loader::LoaderSession;
use mdemo_renderer::PageRenderer;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for `mdemo render`.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    pub input: PathBuf,

    /// Output HTML file (defaults to the input with an .html extension).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file path (otherwise mdemo.toml is discovered upward).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Page title (defaults to the input file stem).
    #[arg(long)]
    pub title: Option<String>,

    /// Skip network fetches for demo libraries.
    #[arg(long)]
    pub offline: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Render the input file to HTML.
    pub(crate) fn execute(&self, output: &Output) -> Result<(), CliError> {
        if !self.input.is_file() {
            return Err(CliError::Validation(format!(
                "input file not found: {}",
                self.input.display()
            )));
        }

        let start_dir = self
            .input
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let cli = CliSettings {
            offline: if self.offline { Some(true) } else { None },
            timeout_secs: None,
        };
        let config = Config::load(self.config.as_deref(), &start_dir, &cli)?;

        let markdown = std::fs::read_to_string(&self.input)?;
        let title = self.title.clone().unwrap_or_else(|| {
            self.input
                .file_stem()
                .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned())
        });

        let mut session = if config.loader.offline {
            LoaderSession::offline()
        } else {
            LoaderSession::with_http(Duration::from_secs(config.loader.timeout_secs))
        };

        let result =
            PageRenderer::new(&config).render_document(&markdown, &title, &mut session);

        for warning in &result.warnings {
            output.warning(&format!("warning: {warning}"));
        }

        let out_path = self
            .output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("html"));
        std::fs::write(&out_path, &result.html)?;

        tracing::info!(
            demos = result.demo_count,
            warnings = result.warnings.len(),
            output = %out_path.display(),
            "page rendered"
        );
        output.success(&format!(
            "Rendered {} demo(s) to {}",
            result.demo_count,
            out_path.display()
        ));
        Ok(())
    }
}
