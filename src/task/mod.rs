//! Pipeline tasks.
//!
//! Every task turns the source set of one category into files under that
//! category's destination. Tasks share nothing but the configuration and an
//! optional live-reload handle, both carried by [`TaskContext`].
//!
//! ```text
//! task/
//! ├── clean      # empty the output directory
//! ├── templates  # Tera -> HTML
//! ├── markup     # HTML -> collapsed HTML
//! ├── styles     # Sass/CSS -> style.min.css (+ map)
//! ├── scripts    # JS -> main.min.js (+ index map)
//! ├── images     # JPEG/PNG re-encode, others copied
//! ├── fonts      # verbatim copy
//! ├── sitemap    # output HTML -> sitemap.xml
//! └── robots     # robots.txt
//! ```

mod clean;
mod fonts;
mod images;
mod markup;
mod robots;
mod scripts;
mod sitemap;
mod styles;
mod templates;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{CategoryPaths, PipelineConfig};
use crate::core::Category;
use crate::reload::{ReloadHandle, ReloadMessage};
use crate::utils::glob::{SourceFile, SourceSet};
use crate::utils::{plural_count, size::format_size};
use crate::{debug, log};

/// A named unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Clean,
    Templates,
    Markup,
    Styles,
    Scripts,
    Images,
    Fonts,
    Sitemap,
    Robots,
}

impl Task {
    pub fn name(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Templates => "templates",
            Self::Markup => "markup",
            Self::Styles => "styles",
            Self::Scripts => "scripts",
            Self::Images => "images",
            Self::Fonts => "fonts",
            Self::Sitemap => "sitemap",
            Self::Robots => "robots",
        }
    }
}

/// Shared state handed to every task.
#[derive(Clone)]
pub struct TaskContext {
    pub config: Arc<PipelineConfig>,
    reload: Option<ReloadHandle>,
}

impl TaskContext {
    pub fn new(config: Arc<PipelineConfig>) -> Self {
        Self {
            config,
            reload: None,
        }
    }

    /// Attach a live-reload channel; tasks notify it after writing.
    pub fn with_reload(mut self, reload: ReloadHandle) -> Self {
        self.reload = Some(reload);
        self
    }

    /// Send a message to live-reload clients, if any are attached.
    pub fn notify(&self, msg: ReloadMessage) {
        if let Some(reload) = &self.reload {
            reload.send(msg);
        }
    }

    pub fn paths(&self, category: Category) -> &CategoryPaths {
        self.config.paths.get(category)
    }

    /// Resolve the category's globs against the project root.
    pub fn source_set(&self, category: Category) -> Result<SourceSet> {
        SourceSet::new(&self.config.root, &self.paths(category).src)
            .with_context(|| format!("invalid `paths.{}.src`", category.name()))
    }

    /// Files currently matched by the category's globs.
    pub fn sources(&self, category: Category) -> Result<Vec<SourceFile>> {
        self.source_set(category)?.files()
    }

    pub fn dest(&self, category: Category) -> &Path {
        &self.paths(category).dest
    }
}

/// A file produced by a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Files a task wrote, and how many inputs it left alone.
#[derive(Debug)]
pub struct TaskReport {
    pub task: Task,
    pub written: Vec<WrittenFile>,
    pub skipped: usize,
}

impl TaskReport {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            written: Vec::new(),
            skipped: 0,
        }
    }

    /// Write `content` to `path`, creating parent directories.
    pub fn write(&mut self, path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
        let content = content.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
        self.written.push(WrittenFile {
            path: path.to_path_buf(),
            size: content.len() as u64,
        });
        Ok(())
    }

    /// Record a file written by other means (e.g. `fs::copy`).
    pub fn record(&mut self, path: &Path, size: u64) {
        self.written.push(WrittenFile {
            path: path.to_path_buf(),
            size,
        });
    }

    pub fn total_size(&self) -> u64 {
        self.written.iter().map(|f| f.size).sum()
    }

    /// Print one line per written file, then the total.
    pub fn log(&self, config: &PipelineConfig) {
        let name = self.task.name();
        for file in &self.written {
            log!(name; "{}  {}", config.root_relative(&file.path).display(), format_size(file.size));
        }
        if self.skipped > 0 {
            debug!(name; "{} up to date", plural_count(self.skipped, "file"));
        }
        if self.written.is_empty() {
            if self.task != Task::Clean {
                log!(name; "nothing written");
            }
            return;
        }
        log!("size"; "{}: {}, {} total", name, plural_count(self.written.len(), "file"), format_size(self.total_size()));
    }
}

/// Run one task and print its size report.
///
/// Errors carry the task name as their outermost context.
pub fn run(task: Task, ctx: &TaskContext) -> Result<TaskReport> {
    debug!(task.name(); "starting");
    let result = match task {
        Task::Clean => clean::run(ctx),
        Task::Templates => templates::run(ctx),
        Task::Markup => markup::run(ctx),
        Task::Styles => styles::run(ctx),
        Task::Scripts => scripts::run(ctx),
        Task::Images => images::run(ctx),
        Task::Fonts => fonts::run(ctx),
        Task::Sitemap => sitemap::run(ctx),
        Task::Robots => robots::run(ctx),
    };
    let report = result.with_context(|| format!("task `{}` failed", task.name()))?;
    report.log(&ctx.config);
    Ok(report)
}
