//! Tera template rendering.
//!
//! All matched templates are registered in one engine under their
//! base-relative, slash-separated names, so `{% extends "_layout.tera" %}`
//! and `{% include "partials/_nav.tera" %}` resolve between them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tera::Tera;

use crate::utils::{glob::SourceFile, path::to_slash};

/// Template extension stripped from output names.
const TEMPLATE_EXT: &str = "tera";

/// Per-page values exposed to templates as `page`.
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    /// Template name, e.g. `blog/index.tera`
    pub template: &'a str,
    /// Output path relative to the destination, e.g. `blog/index.html`
    pub path: String,
}

/// Registered templates plus the names of those that produce pages.
pub struct TemplateSet {
    tera: Tera,
    entries: Vec<(String, PathBuf)>,
}

impl TemplateSet {
    /// Register every file; files whose name starts with `_` are partials.
    pub fn load(files: &[SourceFile]) -> Result<Self> {
        let mut tera = Tera::default();
        let mut named = Vec::with_capacity(files.len());
        let mut entries = Vec::new();

        for file in files {
            let name = to_slash(file.relative());
            if !file.is_partial() {
                entries.push((name.clone(), file.relative().to_path_buf()));
            }
            named.push((file.path.clone(), Some(name)));
        }

        tera.add_template_files(named)
            .context("failed to parse templates")?;
        Ok(Self { tera, entries })
    }

    /// Entry template names with their base-relative source paths.
    pub fn entries(&self) -> &[(String, PathBuf)] {
        &self.entries
    }

    /// Render one entry with `site_url` and `page` in the context.
    pub fn render(&self, name: &str, site_url: &str) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("site_url", site_url);
        context.insert(
            "page",
            &PageContext {
                template: name,
                path: to_slash(&output_name(Path::new(name))),
            },
        );
        self.tera
            .render(name, &context)
            .with_context(|| format!("failed to render template `{name}`"))
    }
}

/// Output path for a template: `.tera` dropped, `.html` ensured.
///
/// `index.tera` -> `index.html`, `feed.xml.tera` -> `feed.xml`,
/// `about.html.tera` -> `about.html`
pub fn output_name(relative: &Path) -> PathBuf {
    let mut out = relative.to_path_buf();
    if out.extension().is_some_and(|e| e == TEMPLATE_EXT) {
        out.set_extension("");
    }
    if out.extension().is_none() {
        out.set_extension("html");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn source(dir: &TempDir, rel: &str, content: &str) -> SourceFile {
        let path = dir.path().join("src").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        SourceFile {
            path,
            base: dir.path().join("src"),
        }
    }

    #[test]
    fn test_output_name() {
        assert_eq!(output_name(Path::new("index.tera")), PathBuf::from("index.html"));
        assert_eq!(
            output_name(Path::new("blog/post.html.tera")),
            PathBuf::from("blog/post.html")
        );
        assert_eq!(output_name(Path::new("feed.xml.tera")), PathBuf::from("feed.xml"));
    }

    #[test]
    fn test_partials_are_not_entries() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            source(&dir, "_layout.tera", "<main>{% block body %}{% endblock %}</main>"),
            source(
                &dir,
                "index.tera",
                "{% extends \"_layout.tera\" %}{% block body %}home{% endblock %}",
            ),
        ];
        let set = TemplateSet::load(&files).unwrap();
        let names: Vec<_> = set.entries().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["index.tera"]);
        assert_eq!(set.render("index.tera", "https://x.dev").unwrap(), "<main>home</main>");
    }

    #[test]
    fn test_context_values() {
        let dir = TempDir::new().unwrap();
        let files = vec![source(
            &dir,
            "blog/index.tera",
            "{{ site_url }}|{{ page.path }}|{{ page.template }}",
        )];
        let set = TemplateSet::load(&files).unwrap();
        assert_eq!(
            set.render("blog/index.tera", "https://x.dev").unwrap(),
            "https://x.dev|blog/index.html|blog/index.tera"
        );
    }

    #[test]
    fn test_include_nested_partial() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            source(&dir, "partials/_nav.tera", "<nav></nav>"),
            source(&dir, "index.tera", "{% include \"partials/_nav.tera\" %}"),
        ];
        let set = TemplateSet::load(&files).unwrap();
        assert_eq!(set.render("index.tera", "").unwrap(), "<nav></nav>");
    }

    #[test]
    fn test_syntax_error_fails_load() {
        let dir = TempDir::new().unwrap();
        let files = vec![source(&dir, "broken.tera", "{% if %}")];
        assert!(TemplateSet::load(&files).is_err());
    }

    #[test]
    fn test_missing_variable_fails_render() {
        let dir = TempDir::new().unwrap();
        let files = vec![source(&dir, "index.tera", "{{ missing.field }}")];
        let set = TemplateSet::load(&files).unwrap();
        assert!(set.render("index.tera", "").is_err());
    }
}
