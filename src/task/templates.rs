//! Render Tera templates to HTML.

use anyhow::Result;

use super::{Task, TaskContext, TaskReport};
use crate::compiler::html::collapse_whitespace;
use crate::compiler::template::{TemplateSet, output_name};
use crate::core::Category;
use crate::reload::ReloadMessage;

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let mut report = TaskReport::new(Task::Templates);
    let files = ctx.sources(Category::Templates)?;
    if files.is_empty() {
        return Ok(report);
    }

    let set = TemplateSet::load(&files)?;
    let dest = ctx.dest(Category::Templates);
    let site_url = ctx.config.site.origin();

    for (name, relative) in set.entries() {
        let rendered = set.render(name, site_url)?;
        let output = dest.join(output_name(relative));
        // Non-HTML outputs (feed.xml.tera) keep their whitespace.
        if output.extension().is_some_and(|e| e == "html") {
            report.write(&output, collapse_whitespace(rendered.as_bytes()))?;
        } else {
            report.write(&output, rendered)?;
        }
    }

    if !report.written.is_empty() {
        ctx.notify(ReloadMessage::reload("templates"));
    }
    Ok(report)
}
