//! Copy font files verbatim.

use std::fs;

use anyhow::{Context, Result};

use super::{Task, TaskContext, TaskReport};
use crate::core::Category;

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let mut report = TaskReport::new(Task::Fonts);
    let dest = ctx.dest(Category::Fonts);

    for file in ctx.sources(Category::Fonts)? {
        let output = dest.join(file.relative());
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let size = fs::copy(&file.path, &output)
            .with_context(|| format!("failed to copy {}", file.path.display()))?;
        report.record(&output, size);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use crate::task::testing::Project;
    use crate::task::{Task, run};

    #[test]
    fn test_copies_tree() {
        let project = Project::new();
        project.write("src/fonts/inter.woff2", "woff2-bytes");
        project.write("src/fonts/mono/fira.ttf", "ttf");
        project.write("src/fonts/.DS_Store", "junk");

        let report = run(Task::Fonts, &project.ctx).unwrap();

        assert_eq!(report.written.len(), 2);
        assert_eq!(report.total_size(), 14);
        assert_eq!(project.read("dist/fonts/inter.woff2"), "woff2-bytes");
        assert_eq!(project.read("dist/fonts/mono/fira.ttf"), "ttf");
        assert!(!project.exists("dist/fonts/.DS_Store"));
    }
}
