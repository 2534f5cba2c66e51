//! Empty the output directory, keeping preserved entries.

use std::fs;

use anyhow::{Context, Result};

use super::{Task, TaskContext, TaskReport};
use crate::log;
use crate::utils::plural_count;

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let report = TaskReport::new(Task::Clean);
    let output = &ctx.config.build.output;
    if !output.is_dir() {
        return Ok(report);
    }

    let preserve = &ctx.config.clean.preserve;
    let mut removed = 0;
    for entry in fs::read_dir(output).with_context(|| format!("failed to read {}", output.display()))? {
        let entry = entry?;
        let name = entry.file_name();
        if preserve.iter().any(|p| name == p.as_str()) {
            continue;
        }

        let path = entry.path();
        let result = if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.with_context(|| format!("failed to remove {}", path.display()))?;
        removed += 1;
    }

    if removed > 0 {
        log!("clean"; "removed {} from {}", plural_count(removed, "entry"), ctx.config.root_relative(output).display());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use crate::task::testing::Project;
    use crate::task::{Task, run};

    #[test]
    fn test_keeps_preserved() {
        let project = Project::new();
        project.write("dist/index.html", "x");
        project.write("dist/css/style.min.css", "x");
        project.write("dist/img/logo.png", "x");

        run(Task::Clean, &project.ctx).unwrap();

        assert!(!project.exists("dist/index.html"));
        assert!(!project.exists("dist/css"));
        assert!(project.exists("dist/img/logo.png"));
    }

    #[test]
    fn test_second_run_is_noop() {
        let project = Project::new();
        project.write("dist/a.html", "x");
        run(Task::Clean, &project.ctx).unwrap();
        run(Task::Clean, &project.ctx).unwrap();
        assert!(project.exists("dist"));
        assert!(!project.exists("dist/a.html"));
    }

    #[test]
    fn test_missing_output() {
        let project = Project::new();
        let report = run(Task::Clean, &project.ctx).unwrap();
        assert!(report.written.is_empty());
    }

    #[test]
    fn test_custom_preserve() {
        let project = Project::with_config("[clean]\npreserve = [\"fonts\", \"CNAME\"]");
        project.write("dist/fonts/a.woff2", "x");
        project.write("dist/CNAME", "x");
        project.write("dist/img/logo.png", "x");

        run(Task::Clean, &project.ctx).unwrap();

        assert!(project.exists("dist/fonts/a.woff2"));
        assert!(project.exists("dist/CNAME"));
        assert!(!project.exists("dist/img"));
    }
}
