//! Collapse whitespace in plain HTML sources.

use std::fs;

use anyhow::{Context, Result};

use super::{Task, TaskContext, TaskReport};
use crate::compiler::html::collapse_whitespace;
use crate::core::Category;
use crate::reload::ReloadMessage;

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let mut report = TaskReport::new(Task::Markup);
    let dest = ctx.dest(Category::Markup);

    for file in ctx.sources(Category::Markup)? {
        let source =
            fs::read(&file.path).with_context(|| format!("failed to read {}", file.path.display()))?;
        report.write(&dest.join(file.relative()), collapse_whitespace(&source))?;
    }

    if !report.written.is_empty() {
        ctx.notify(ReloadMessage::reload("markup"));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use crate::task::testing::Project;
    use crate::task::{Task, run};

    #[test]
    fn test_collapses_and_keeps_structure() {
        let project = Project::new();
        project.write(
            "src/about/index.html",
            "<html>\n<head>\n  <title>About</title>\n</head>\n<body>\n  <!-- nav -->\n  <p>hi</p>\n</body>\n</html>\n",
        );

        let report = run(Task::Markup, &project.ctx).unwrap();
        assert_eq!(report.written.len(), 1);

        let out = project.read("dist/about/index.html");
        assert!(out.contains("<html>"));
        assert!(out.contains("<head>"));
        assert!(out.contains("<!-- nav -->"));
        assert!(out.contains("</p>"));
        assert!(out.len() < 100);
    }

    #[test]
    fn test_no_sources() {
        let project = Project::new();
        let report = run(Task::Markup, &project.ctx).unwrap();
        assert!(report.written.is_empty());
    }
}
