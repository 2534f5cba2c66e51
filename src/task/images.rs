//! Re-encode images, skipping destinations that are up to date.

use std::fs;

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::{Task, TaskContext, TaskReport};
use crate::compiler::image::{self, Optimized};
use crate::core::Category;
use crate::freshness::is_stale;
use crate::utils::glob::SourceFile;

pub fn run(ctx: &TaskContext) -> Result<TaskReport> {
    let mut report = TaskReport::new(Task::Images);
    let dest = ctx.dest(Category::Images);
    let quality = ctx.config.images.jpeg_quality;

    let (stale, fresh): (Vec<SourceFile>, Vec<SourceFile>) = ctx
        .sources(Category::Images)?
        .into_iter()
        .partition(|file| is_stale(&file.path, &dest.join(file.relative())));
    report.skipped = fresh.len();

    // Encoding dominates; files are independent.
    let encoded = stale
        .par_iter()
        .map(|file| {
            let bytes = fs::read(&file.path)
                .with_context(|| format!("failed to read {}", file.path.display()))?;
            let out = match image::optimize(&file.path, &bytes, quality)? {
                Optimized::Reencoded(smaller) => smaller,
                Optimized::Original => bytes,
            };
            Ok((dest.join(file.relative()), out))
        })
        .collect::<Result<Vec<_>>>()?;

    for (output, bytes) in encoded {
        report.write(&output, bytes)?;
    }
    Ok(report)
}
