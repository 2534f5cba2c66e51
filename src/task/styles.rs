//! Compile, prefix and minify stylesheets into one file.
//!
//! Compile and parse errors never fail the task: the offending file is
//! reported and left out of the output.

use std::path::Path;

use anyhow::Result;

use super::{Task, TaskContext, TaskReport};
use crate::compiler::css::{self, CssEntry};
use crate::core::Category;
use crate::log;
use crate::reload::ReloadMessage;
use crate::utils::path::{relative_to, to_slash};

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let mut report = TaskReport::new(Task::Styles);
    let config = &ctx.config.styles;

    let dest = ctx.dest(Category::Styles);
    let mut entries = Vec::new();
    for file in ctx.sources(Category::Styles)? {
        if file.is_partial() {
            continue;
        }
        let entry = css::compile_source(&file.path, &file.base).and_then(|code| {
            let entry = CssEntry {
                name: to_slash(&relative_to(dest, &file.path)),
                code,
            };
            css::check(&entry).map(|()| entry)
        });
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                log!("error"; "{}: {e:#}", ctx.config.root_relative(&file.path).display());
                report.skipped += 1;
            }
        }
    }

    if entries.is_empty() {
        return Ok(report);
    }

    let file_name = config.file_name();
    let out = match css::optimize(&entries, &config.targets, config.source_map) {
        Ok(out) => out,
        Err(e) => {
            log!("error"; "{file_name}: {e:#}");
            return Ok(report);
        }
    };

    let output = dest.join(&file_name);
    match out.map {
        Some(map) => {
            let map_name = format!("{file_name}.map");
            let code = format!("{}\n/*# sourceMappingURL={map_name} */", out.code);
            report.write(&output, code)?;
            report.write(&dest.join(map_name), map)?;
        }
        None => report.write(&output, out.code)?,
    }

    ctx.notify(stylesheet_message(&ctx.config.build.output, &output));
    Ok(report)
}

/// Refresh message for a stylesheet served from `output`; a full reload when
/// the file lives outside the served tree.
fn stylesheet_message(output_dir: &Path, file: &Path) -> ReloadMessage {
    match file.strip_prefix(output_dir) {
        Ok(rel) => ReloadMessage::css(format!("/{}", to_slash(rel))),
        Err(_) => ReloadMessage::reload("styles"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::testing::Project;
    use crate::task::run;
    use std::fs;

    fn dist_css(project: &Project) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(project.root().join("dist/css"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_single_output_with_map() {
        let project = Project::new();
        project.write("src/scss/_vars.scss", "$accent: #ff0000;");
        project.write("src/scss/main.scss", "@use 'vars';\n.btn { color: vars.$accent; }");
        project.write("src/scss/reset.css", "* { margin: 0; }");

        run(Task::Styles, &project.ctx).unwrap();

        assert_eq!(dist_css(&project), vec!["style.min.css", "style.min.css.map"]);
        let css = project.read("dist/css/style.min.css");
        assert!(css.contains(".btn{color:red}"));
        assert!(css.contains("*{margin:0}"));
        assert!(css.ends_with("/*# sourceMappingURL=style.min.css.map */"));

        let map: serde_json::Value =
            serde_json::from_str(&project.read("dist/css/style.min.css.map")).unwrap();
        assert_eq!(map["version"], 3);
    }

    #[test]
    fn test_broken_file_skipped() {
        let project = Project::new();
        project.write("src/scss/bad.scss", ".a { color: $nope; }");
        project.write("src/scss/good.scss", ".b { margin: 0; }");

        let report = run(Task::Styles, &project.ctx).unwrap();

        assert_eq!(report.skipped, 1);
        let css = project.read("dist/css/style.min.css");
        assert!(css.contains(".b{margin:0}"));
        assert!(!css.contains(".a"));
    }

    #[test]
    fn test_invalid_css_entry_skipped() {
        let project = Project::new();
        project.write("src/scss/a.scss", ".a { padding: 0; }");
        project.write("src/scss/b.css", ".b { color: red; }\n@import \"late.css\";");
        project.write("src/scss/c.css", ".c { margin: 0; }");

        let report = run(Task::Styles, &project.ctx).unwrap();

        assert_eq!(report.skipped, 1);
        let css = project.read("dist/css/style.min.css");
        assert!(css.contains(".a{padding:0}"));
        assert!(css.contains(".c{margin:0}"));
        assert!(!css.contains(".b"));
    }

    #[test]
    fn test_import_in_later_file() {
        let project = Project::new();
        project.write("src/scss/a.css", ".a { padding: 0; }");
        project.write(
            "src/scss/b.css",
            "@import url(\"https://fonts.example/inter.css\");\n.b { margin: 0; }",
        );

        let report = run(Task::Styles, &project.ctx).unwrap();

        assert_eq!(report.skipped, 0);
        let css = project.read("dist/css/style.min.css");
        assert!(css.starts_with("@import"));
        assert!(css.contains(".a{padding:0}"));
        assert!(css.contains(".b{margin:0}"));

        let map: serde_json::Value =
            serde_json::from_str(&project.read("dist/css/style.min.css.map")).unwrap();
        assert!(map["sources"].to_string().contains("src/scss/b.css"));
    }

    #[test]
    fn test_nothing_compiles() {
        let project = Project::new();
        project.write("src/scss/bad.scss", ".a { color: $nope; }");

        let report = run(Task::Styles, &project.ctx).unwrap();
        assert!(report.written.is_empty());
        assert!(!project.exists("dist/css/style.min.css"));
    }

    #[test]
    fn test_without_source_map() {
        let project =
            Project::with_config("[styles]\nbasename = \"site\"\nsuffix = \"\"\nsource_map = false");
        project.write("src/scss/a.css", ".a { color: red; }");

        run(Task::Styles, &project.ctx).unwrap();

        assert_eq!(dist_css(&project), vec!["site.css"]);
        assert!(!project.read("dist/css/site.css").contains("sourceMappingURL"));
    }

    #[test]
    fn test_stylesheet_message() {
        let msg = stylesheet_message(Path::new("/site/dist"), Path::new("/site/dist/css/style.min.css"));
        assert_eq!(msg, ReloadMessage::css("/css/style.min.css"));

        let msg = stylesheet_message(Path::new("/site/dist"), Path::new("/elsewhere/style.css"));
        assert!(matches!(msg, ReloadMessage::Reload { .. }));
    }
}
