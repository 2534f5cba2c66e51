//! `[paths.*]` sections: the path-mapping table.
//!
//! One table per asset category, each with an ordered glob list and a
//! destination directory, both relative to the project root.
//!
//! # Example
//!
//! ```toml
//! [paths.styles]
//! src = ["src/scss/**/*.scss", "!src/scss/vendor/**"]
//! dest = "dist/css"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::core::Category;

/// Source globs and destination of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPaths {
    pub src: Vec<String>,
    pub dest: PathBuf,
}

impl CategoryPaths {
    fn new(src: &[&str], dest: &str) -> Self {
        Self {
            src: src.iter().map(|s| (*s).to_string()).collect(),
            dest: PathBuf::from(dest),
        }
    }

    /// Collect diagnostics for this row under `paths.<name>`.
    pub fn validate(&self, name: &str, diag: &mut ConfigDiagnostics) {
        if self.src.is_empty() {
            diag.error(format!("paths.{name}.src"), "glob list is empty");
        }
        if self.src.iter().any(|p| p.trim().trim_start_matches('!').is_empty()) {
            diag.error(format!("paths.{name}.src"), "contains an empty pattern");
        }
        let has_positive = self.src.iter().any(|p| {
            let p = p.trim();
            !p.is_empty() && !p.starts_with('!')
        });
        if !self.src.is_empty() && !has_positive {
            diag.error_with_hint(
                format!("paths.{name}.src"),
                "no positive pattern",
                "patterns starting with `!` only exclude files",
            );
        }
        if self.dest.as_os_str().is_empty() {
            diag.error(format!("paths.{name}.dest"), "destination is empty");
        }
    }

    /// Make `dest` absolute.
    pub fn resolve(&mut self, root: &Path) {
        if self.dest.is_relative() {
            self.dest = root.join(&self.dest);
        }
    }
}

/// Path-mapping table, one row per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub templates: CategoryPaths,
    pub markup: CategoryPaths,
    pub styles: CategoryPaths,
    pub scripts: CategoryPaths,
    pub images: CategoryPaths,
    pub fonts: CategoryPaths,
    pub sitemap: CategoryPaths,
    pub robots: CategoryPaths,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            templates: CategoryPaths::new(&["src/**/*.tera", "!node_modules/**"], "dist"),
            markup: CategoryPaths::new(&["src/**/*.html"], "dist"),
            styles: CategoryPaths::new(
                &[
                    "src/scss/**/*.sass",
                    "src/scss/**/*.scss",
                    "src/scss/**/*.css",
                ],
                "dist/css",
            ),
            scripts: CategoryPaths::new(&["src/scripts/**/*.js"], "dist/js"),
            images: CategoryPaths::new(&["src/img/**"], "dist/img"),
            fonts: CategoryPaths::new(&["src/fonts/**"], "dist/fonts"),
            sitemap: CategoryPaths::new(&["dist/**/*.html"], "dist"),
            robots: CategoryPaths::new(&["dist/index.html"], "dist"),
        }
    }
}

impl PathsConfig {
    pub fn get(&self, category: Category) -> &CategoryPaths {
        match category {
            Category::Templates => &self.templates,
            Category::Markup => &self.markup,
            Category::Styles => &self.styles,
            Category::Scripts => &self.scripts,
            Category::Images => &self.images,
            Category::Fonts => &self.fonts,
            Category::Sitemap => &self.sitemap,
            Category::Robots => &self.robots,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut CategoryPaths {
        match category {
            Category::Templates => &mut self.templates,
            Category::Markup => &mut self.markup,
            Category::Styles => &mut self.styles,
            Category::Scripts => &mut self.scripts,
            Category::Images => &mut self.images,
            Category::Fonts => &mut self.fonts,
            Category::Sitemap => &mut self.sitemap,
            Category::Robots => &mut self.robots,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for category in Category::ALL {
            self.get(category).validate(category.name(), diag);
        }
    }

    pub fn resolve(&mut self, root: &Path) {
        for category in Category::ALL {
            self.get_mut(category).resolve(root);
        }
    }
}
