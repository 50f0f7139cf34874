//! Configuration management for mdemo.
//!
//! Parses `mdemo.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! The `[demo]` section carries the default external library lists every
//! demo receives; per-demo overrides from container attributes are merged
//! with [`DemoOptions::merged_with`] using set semantics, so no requested
//! library is lost and none is emitted twice.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdemo.toml";

/// Error loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The config file is not valid TOML.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override loader offline flag.
    pub offline: Option<bool>,
    /// Override loader timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Demo rendering defaults.
    pub demo: DemoOptions,
    /// Markdown rendering configuration.
    pub render: RenderConfig,
    /// Library loader configuration.
    pub loader: LoaderConfig,
}

/// Default external libraries for every demo.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DemoOptions {
    /// Script library URLs loaded for each demo.
    pub js_lib: Vec<String>,
    /// Stylesheet URLs linked for each demo.
    pub css_lib: Vec<String>,
}

impl DemoOptions {
    /// Merge per-demo overrides into these defaults.
    ///
    /// Each list is the order-preserving union of defaults followed by the
    /// override entries.
    #[must_use]
    pub fn merged_with(&self, overrides: &DemoOverrides) -> Self {
        Self {
            js_lib: merge_libs(&self.js_lib, &overrides.js_lib),
            css_lib: merge_libs(&self.css_lib, &overrides.css_lib),
        }
    }
}

/// Per-demo library overrides parsed from container attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoOverrides {
    /// Additional script library URLs.
    pub js_lib: Vec<String>,
    /// Additional stylesheet URLs.
    pub css_lib: Vec<String>,
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Enable GitHub Flavored Markdown features.
    pub gfm: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { gfm: true }
    }
}

/// Library loader configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderConfig {
    /// HTTP timeout in seconds for library fetches.
    pub timeout_secs: u64,
    /// Skip network fetches entirely (elements are still emitted).
    pub offline: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            offline: false,
        }
    }
}

impl Config {
    /// Load configuration, applying CLI overrides.
    ///
    /// When `path` is given, that file is loaded (an error if unreadable).
    /// Otherwise `mdemo.toml` is searched upward from `start_dir`; if no
    /// file is found the defaults are used.
    pub fn load(
        path: Option<&Path>,
        start_dir: &Path,
        cli: &CliSettings,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match discover(start_dir) {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };
        config.apply_cli(cli);
        Ok(config)
    }

    /// Parse a specific config file.
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply non-None CLI settings over loaded values.
    fn apply_cli(&mut self, cli: &CliSettings) {
        if let Some(offline) = cli.offline {
            self.loader.offline = offline;
        }
        if let Some(timeout) = cli.timeout_secs {
            self.loader.timeout_secs = timeout;
        }
    }
}

/// Search for `mdemo.toml` in `start` and its ancestors.
#[must_use]
pub fn discover(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

/// Order-preserving union of two library lists.
///
/// Defaults come first, then override entries not already present. No
/// duplicates remain, including duplicates within either input.
#[must_use]
pub fn merge_libs(defaults: &[String], overrides: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(defaults.len() + overrides.len());
    for lib in defaults.iter().chain(overrides) {
        if !merged.iter().any(|seen| seen == lib) {
            merged.push(lib.clone());
        }
    }
    merged
}
