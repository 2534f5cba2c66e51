//! `[styles]`, `[scripts]` and `[images]` sections.
//!
//! Fixed options handed to the stylesheet, script and image transformers.
//!
//! ```toml
//! [styles]
//! basename = "style"
//! suffix = ".min"
//! source_map = true
//!
//! [styles.targets]
//! chrome = 80
//! safari = 13
//!
//! [scripts]
//! bundle = "main.min.js"
//! target = "es2015"
//!
//! [images]
//! jpeg_quality = 75
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Stylesheet output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    /// Output file stem.
    pub basename: String,
    /// Appended to the stem (`style` + `.min` -> `style.min.css`).
    pub suffix: String,
    /// Write `<name>.css.map` and a `sourceMappingURL` comment.
    pub source_map: bool,
    /// Minimum browser versions for vendor prefixing.
    pub targets: BrowserTargets,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            basename: "style".to_string(),
            suffix: ".min".to_string(),
            source_map: true,
            targets: BrowserTargets::default(),
        }
    }
}

impl StylesConfig {
    /// `<basename><suffix>.css`
    pub fn file_name(&self) -> String {
        format!("{}{}.css", self.basename, self.suffix)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.basename.trim().is_empty() {
            diag.error("styles.basename", "output name is empty");
        }
        if self.basename.contains(['/', '\\']) || self.suffix.contains(['/', '\\']) {
            diag.error("styles.basename", "output name must not contain path separators");
        }
    }
}

/// Minimum major browser versions. A missing entry means "not targeted".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserTargets {
    pub chrome: Option<u32>,
    pub firefox: Option<u32>,
    pub safari: Option<u32>,
    pub edge: Option<u32>,
    pub ios_saf: Option<u32>,
    pub android: Option<u32>,
}

impl Default for BrowserTargets {
    fn default() -> Self {
        Self {
            chrome: Some(80),
            firefox: Some(78),
            safari: Some(13),
            edge: Some(88),
            ios_saf: None,
            android: None,
        }
    }
}

/// Script bundle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    /// Bundle file name inside the scripts destination.
    pub bundle: String,
    /// ECMAScript target for down-leveling (`es2015` .. `esnext`).
    pub target: String,
    /// Write `<bundle>.map` and a `sourceMappingURL` comment.
    pub source_map: bool,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            bundle: "main.min.js".to_string(),
            target: "es2015".to_string(),
            source_map: true,
        }
    }
}

/// Targets accepted by the script transformer.
const ES_TARGETS: &[&str] = &[
    "es5", "es2015", "es2016", "es2017", "es2018", "es2019", "es2020", "es2021", "es2022",
    "es2023", "es2024", "esnext",
];

impl ScriptsConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.bundle.trim().is_empty() {
            diag.error("scripts.bundle", "bundle name is empty");
        } else if self.bundle.contains(['/', '\\']) {
            diag.error("scripts.bundle", "bundle name must not contain path separators");
        }
        if !ES_TARGETS.contains(&self.target.to_ascii_lowercase().as_str()) {
            diag.error_with_hint(
                "scripts.target",
                format!("unknown target `{}`", self.target),
                format!("expected one of: {}", ES_TARGETS.join(", ")),
            );
        }
    }
}

/// Image optimization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// JPEG re-encoding quality, 1..=100.
    pub jpeg_quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self { jpeg_quality: 75 }
    }
}

impl ImagesConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(1..=100).contains(&self.jpeg_quality) {
            diag.error_with_hint(
                "images.jpeg_quality",
                format!("quality {} is out of range", self.jpeg_quality),
                "use a value between 1 and 100",
            );
        }
    }
}
