//! One file watcher per category.
//!
//! ```text
//! notify callback -> std channel -> bridge thread -> tokio channel
//!     -> Debouncer -> matching paths -> action (awaited, so never overlapping)
//! ```

use std::path::Path;
use std::sync::mpsc as std_mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::debouncer::Debouncer;
use crate::logger::{status_error, status_success};
use crate::reload::ReloadMessage;
use crate::task::{self, Task, TaskContext};
use crate::utils::glob::SourceSet;
use crate::utils::plural_count;
use crate::{debug, log};

/// What a watcher does once its category changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchAction {
    /// Re-run the owning task
    Run(Task),
    /// Tell live-reload clients to reload the page
    Reload,
}

pub struct CategoryWatcher {
    name: &'static str,
    set: SourceSet,
    action: WatchAction,
    debouncer: Debouncer,
    notify_rx: std_mpsc::Receiver<notify::Result<notify::Event>>,
    /// Kept alive for as long as events should flow.
    watcher: RecommendedWatcher,
}

impl CategoryWatcher {
    /// Start watching the set's roots immediately; events buffer until `run`.
    pub fn new(name: &'static str, set: SourceSet, action: WatchAction, debounce: Duration) -> Result<Self> {
        let (notify_tx, notify_rx) = std_mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })
        .context("failed to create file watcher")?;

        for root in set.watch_roots() {
            watcher
                .watch(&root, RecursiveMode::Recursive)
                .with_context(|| format!("failed to watch {}", root.display()))?;
            debug!("watch"; "{}: {}", name, root.display());
        }

        Ok(Self {
            name,
            set,
            action,
            debouncer: Debouncer::new(debounce),
            notify_rx,
            watcher,
        })
    }

    pub async fn run(self, ctx: TaskContext) {
        let Self {
            name,
            set,
            action,
            mut debouncer,
            notify_rx,
            watcher,
        } = self;
        let _watcher = watcher;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(64);
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => log!("watch"; "notify error: {}", e),
                }
            }
        });

        loop {
            tokio::select! {
                biased;
                event = async_rx.recv() => match event {
                    Some(event) => debouncer.add_event(&event),
                    None => break,
                },
                () = tokio::time::sleep(debouncer.sleep_duration()) => {
                    let Some(changes) = debouncer.take_if_ready() else {
                        continue;
                    };
                    let mut matched: Vec<_> = changes
                        .into_iter()
                        .filter(|(path, _)| set.matches(path))
                        .collect();
                    if matched.is_empty() {
                        continue;
                    }
                    matched.sort_by(|a, b| a.0.cmp(&b.0));
                    for (path, kind) in &matched {
                        debug!("watch"; "{} {}: {}", name, kind.label(), ctx.config.root_relative(path).display());
                    }

                    let first = matched[0].0.clone();
                    handle(action, &ctx, &first, matched.len()).await;
                }
            }
        }
    }
}

/// Run the action to completion before the next batch is taken.
async fn handle(action: WatchAction, ctx: &TaskContext, first: &Path, count: usize) {
    match action {
        WatchAction::Run(task) => {
            let task_ctx = ctx.clone();
            let result = tokio::task::spawn_blocking(move || task::run(task, &task_ctx)).await;
            match result {
                Ok(Ok(report)) => status_success(&format!(
                    "{}: {}",
                    task.name(),
                    plural_count(report.written.len(), "file")
                )),
                Ok(Err(e)) => status_error(&e.to_string(), &format!("{:#}", e.root_cause())),
                Err(e) => status_error(&format!("task `{}` panicked", task.name()), &e.to_string()),
            }
        }
        WatchAction::Reload => {
            let shown = ctx.config.root_relative(first).display().to_string();
            let reason = if count > 1 {
                format!("{shown} (+{} more)", count - 1)
            } else {
                shown
            };
            status_success(&format!("reload: {reason}"));
            ctx.notify(ReloadMessage::reload(reason));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::testing::Project;

    #[test]
    fn test_change_reruns_task() {
        let project = Project::new();
        project.write("src/fonts/a.woff2", "v1");
        let set = project.ctx.source_set(crate::core::Category::Fonts).unwrap();
        let watcher = CategoryWatcher::new(
            "fonts",
            set,
            WatchAction::Run(Task::Fonts),
            Duration::from_millis(20),
        )
        .unwrap();

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let ctx = project.ctx.clone();
        rt.spawn(watcher.run(ctx));

        std::thread::sleep(Duration::from_millis(200));
        project.write("src/fonts/a.woff2", "v2");

        let output = project.root().join("dist/fonts/a.woff2");
        for _ in 0..100 {
            if std::fs::read_to_string(&output).is_ok_and(|s| s == "v2") {
                return;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        panic!("fonts were not re-copied");
    }
}
