//! `[build]`, `[site]` and `[clean]` sections.
//!
//! ```toml
//! [build]
//! output = "dist"
//!
//! [site]
//! url = "https://example.com"
//!
//! [clean]
//! preserve = ["img"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Output directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory, cleaned by the `clean` task and served in watch mode.
    pub output: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dist"),
        }
    }
}

impl BuildConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.as_os_str().is_empty() {
            diag.error("build.output", "output directory is empty");
        }
    }

    pub fn resolve(&mut self, root: &Path) {
        if self.output.is_relative() {
            self.output = root.join(&self.output);
        }
    }
}

/// Public site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site origin used for sitemap `<loc>` entries.
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://dpk78.vasilevich.blog".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match url::Url::parse(&self.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => diag.error_with_hint(
                "site.url",
                format!("unsupported scheme `{}`", url.scheme()),
                "use an http:// or https:// URL",
            ),
            Err(e) => diag.error_with_hint(
                "site.url",
                format!("invalid URL `{}`: {e}", self.url),
                "e.g. url = \"https://example.com\"",
            ),
        }
    }

    /// Site URL without trailing slash, used as the sitemap prefix.
    pub fn origin(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// `clean` task settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Entry names directly under the output directory that survive `clean`.
    pub preserve: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            preserve: vec!["img".to_string()],
        }
    }
}

impl CleanConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for name in &self.preserve {
            if name.is_empty() || name.contains(['/', '\\']) || name == ".." || name == "." {
                diag.error_with_hint(
                    "clean.preserve",
                    format!("`{name}` is not a plain entry name"),
                    "list names of direct children of the output directory",
                );
            }
        }
    }
}
