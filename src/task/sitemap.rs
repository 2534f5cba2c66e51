//! Generate `sitemap.xml` from the HTML files of the output tree.

use anyhow::Result;

use super::{Task, TaskContext, TaskReport};
use crate::core::Category;
use crate::freshness::mtime::get_mtime;
use crate::generator::sitemap::Sitemap;

const FILE_NAME: &str = "sitemap.xml";

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let mut report = TaskReport::new(Task::Sitemap);
    let origin = ctx.config.site.origin();

    let mut sitemap = Sitemap::new();
    for file in ctx.sources(Category::Sitemap)? {
        sitemap.push_page(origin, file.relative(), get_mtime(&file.path));
    }

    crate::debug!("sitemap"; "{} urls", sitemap.len());
    report.write(&ctx.dest(Category::Sitemap).join(FILE_NAME), sitemap.into_xml())?;
    Ok(report)
}
