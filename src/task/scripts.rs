//! Down-level, minify and concatenate scripts into one bundle.

use std::fs;

use anyhow::{Context, Result};

use super::{Task, TaskContext, TaskReport};
use crate::compiler::{js, sourcemap::Bundle};
use crate::core::Category;
use crate::reload::ReloadMessage;
use crate::utils::path::relative_to;

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let mut report = TaskReport::new(Task::Scripts);
    let config = &ctx.config.scripts;
    let dest = ctx.dest(Category::Scripts);

    let mut bundle = Bundle::new(config.bundle.as_str());
    for file in ctx.sources(Category::Scripts)? {
        let source = fs::read_to_string(&file.path)
            .with_context(|| format!("failed to read {}", file.path.display()))?;
        let map_source = config.source_map.then(|| relative_to(dest, &file.path));
        let out = js::transform(&file.path, &source, &config.target, map_source)
            .with_context(|| format!("failed to compile {}", ctx.config.root_relative(&file.path).display()))?;
        bundle.push(out.code.trim_end(), out.map.as_deref())?;
    }

    if bundle.is_empty() {
        return Ok(report);
    }

    let output = dest.join(&config.bundle);
    let (code, map) = bundle.finish();
    if config.source_map {
        let map_name = format!("{}.map", config.bundle);
        report.write(&output, format!("{code}\n//# sourceMappingURL={map_name}\n"))?;
        report.write(&dest.join(map_name), map)?;
    } else {
        report.write(&output, code)?;
    }

    ctx.notify(ReloadMessage::reload("scripts"));
    Ok(report)
}
