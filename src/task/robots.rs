//! Write `robots.txt` once the site's entry page exists.

use anyhow::Result;

use super::{Task, TaskContext, TaskReport};
use crate::core::Category;
use crate::generator::robots::RobotsPolicy;
use crate::log;

const FILE_NAME: &str = "robots.txt";

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let mut report = TaskReport::new(Task::Robots);

    // Only the presence of the source matters, not its content.
    if ctx.sources(Category::Robots)?.is_empty() {
        log!("robots"; "no source matched `{}`, skipped", ctx.paths(Category::Robots).src.join(", "));
        return Ok(report);
    }

    // Written next to the sitemap.
    let output = ctx.dest(Category::Sitemap).join(FILE_NAME);
    report.write(&output, RobotsPolicy::default().to_text())?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use crate::task::testing::Project;
    use crate::task::{Task, run};

    #[test]
    fn test_disallows_everything() {
        let project = Project::new();
        project.write("dist/index.html", "<p>User-agent: googlebot</p>");

        run(Task::Robots, &project.ctx).unwrap();
        assert_eq!(project.read("dist/robots.txt"), "User-agent: *\nDisallow: /\n");
    }

    #[test]
    fn test_missing_source() {
        let project = Project::new();
        let report = run(Task::Robots, &project.ctx).unwrap();
        assert!(report.written.is_empty());
        assert!(!project.exists("dist/robots.txt"));
    }

    #[test]
    fn test_written_to_sitemap_dest() {
        let project = Project::with_config(
            "[paths.sitemap]\nsrc = [\"dist/**/*.html\"]\ndest = \"dist/meta\"",
        );
        project.write("dist/index.html", "");

        run(Task::Robots, &project.ctx).unwrap();
        assert!(project.exists("dist/meta/robots.txt"));
    }
}
