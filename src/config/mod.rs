//! Pipeline configuration management for `sitepipe.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── paths      # [paths.<category>]
//! │   ├── site       # [build], [site], [clean]
//! │   ├── assets     # [styles], [scripts], [images]
//! │   └── serve      # [serve], [watch]
//! ├── error.rs       # ConfigError, ConfigDiagnostics
//! ├── util.rs        # Config file discovery
//! └── mod.rs         # PipelineConfig (this file)
//! ```
//!
//! The configuration is loaded once at startup, validated as a whole, and
//! then shared read-only as `Arc<PipelineConfig>`. Every relative path is
//! resolved against the project root (the config file's directory, or the
//! working directory when no config file exists).

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{
    BrowserTargets, BuildConfig, CategoryPaths, CleanConfig, ImagesConfig, PathsConfig,
    ScriptsConfig, ServeConfig, SiteConfig, StylesConfig, WatchConfig,
};

use crate::{debug, log, utils::path::normalize_path};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::find_config_file;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitepipe.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Project root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub site: SiteConfig,

    /// Path-mapping table
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub clean: CleanConfig,

    #[serde(default)]
    pub styles: StylesConfig,

    #[serde(default)]
    pub scripts: ScriptsConfig,

    #[serde(default)]
    pub images: ImagesConfig,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

impl PipelineConfig {
    /// Load configuration, searching upward from the working directory.
    ///
    /// A missing config file is not an error: built-in defaults apply and
    /// the working directory becomes the project root.
    pub fn load(config_name: &Path) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read working directory")?;

        let mut config = match find_config_file(&cwd, config_name) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                let root = path.parent().map_or_else(|| cwd.clone(), Path::to_path_buf);
                config.root = root;
                config
            }
            None => {
                debug!("config"; "no {} found, using defaults", config_name.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.finalize();
        config.validate()?;
        Ok(config)
    }

    /// Default configuration rooted at `root`, resolved and validated.
    pub fn for_root(root: &Path) -> Result<Self> {
        let mut config = Self {
            root: root.to_path_buf(),
            ..Self::default()
        };
        config.finalize();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content).map_err(ConfigError::Toml)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Resolve the root and every relative destination to absolute paths.
    fn finalize(&mut self) {
        self.root = normalize_path(&self.root);
        let root = self.root.clone();
        self.build.resolve(&root);
        self.paths.resolve(&root);
    }

    /// Collect every diagnostic, then fail once with all of them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.root.is_dir() {
            return Err(ConfigError::Validation(format!(
                "project root `{}` is not a directory",
                self.root.display()
            )));
        }

        let mut diag = ConfigDiagnostics::new();
        self.build.validate(&mut diag);
        self.site.validate(&mut diag);
        self.paths.validate(&mut diag);
        self.clean.validate(&mut diag);
        self.styles.validate(&mut diag);
        self.scripts.validate(&mut diag);
        self.images.validate(&mut diag);
        self.serve.validate(&mut diag);
        diag.into_result()
    }

    /// Strip the project root, for display.
    pub fn root_relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config content.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PipelineConfig {
    let (parsed, ignored) = PipelineConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Parse config content and resolve it against `root`.
#[cfg(test)]
pub fn test_config_at(root: &Path, content: &str) -> PipelineConfig {
    let mut config = test_parse_config(content);
    config.root = root.to_path_buf();
    config.finalize();
    config.validate().unwrap();
    config
}

// ============================================================================
// tests
// ============================================================================
