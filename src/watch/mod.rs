//! Watch mode: per-category watchers and the live-reload channel.
//!
//! Runs on its own thread with a small tokio runtime. Each category gets a
//! watcher that re-runs its task; a watcher on the output tree broadcasts a
//! full reload when generated HTML changes. Categories never block each other.

mod debouncer;
mod watcher;

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam::channel::Receiver;

use crate::config::PipelineConfig;
use crate::core::Category;
use crate::reload::{ReloadHandle, ReloadHub, start_ws_server};
use crate::task::TaskContext;
use crate::utils::glob::SourceSet;
use crate::{debug, log};
use watcher::{CategoryWatcher, WatchAction};

/// Output files whose change triggers a full reload.
const OUTPUT_RELOAD_GLOB: &str = "**/*.html";

/// Running watch mode.
pub struct WatchHandle {
    /// Port the live-reload WebSocket actually bound.
    pub ws_port: u16,
    thread: JoinHandle<()>,
}

/// Bind the live-reload channel and start watching on a background thread.
///
/// Stops when `shutdown_rx` receives.
pub fn spawn(config: Arc<PipelineConfig>, shutdown_rx: Receiver<()>) -> Result<WatchHandle> {
    let (hub, handle) = ReloadHub::new();
    let ws_port = start_ws_server(config.serve.interface, config.serve.reload_port, handle.clone())?;
    debug!("reload"; "ws://{}:{}", config.serve.interface, ws_port);

    let thread = thread::Builder::new()
        .name("watch".into())
        .spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build();
            match runtime {
                Ok(rt) => rt.block_on(run(config, hub, handle, shutdown_rx)),
                Err(e) => log!("watch"; "failed to start runtime: {}", e),
            }
        })
        .context("failed to spawn watch thread")?;

    Ok(WatchHandle { ws_port, thread })
}

impl WatchHandle {
    /// Give the runtime up to two seconds to wind down.
    pub fn join(self) {
        for _ in 0..40 {
            if self.thread.is_finished() {
                let _ = self.thread.join();
                return;
            }
            thread::sleep(Duration::from_millis(50));
        }
    }
}

async fn run(
    config: Arc<PipelineConfig>,
    hub: ReloadHub,
    handle: ReloadHandle,
    shutdown_rx: Receiver<()>,
) {
    let hub_task = tokio::spawn(hub.run());
    let ctx = TaskContext::new(Arc::clone(&config)).with_reload(handle.clone());
    let debounce = Duration::from_millis(config.watch.debounce_ms);

    let mut watching = 0;
    for category in Category::ALL {
        let watcher = ctx.source_set(category).and_then(|set| {
            CategoryWatcher::new(category.name(), set, WatchAction::Run(category.task()), debounce)
        });
        match watcher {
            Ok(watcher) => {
                tokio::spawn(watcher.run(ctx.clone()));
                watching += 1;
            }
            Err(e) => log!("watch"; "{}: {:#}", category.name(), e),
        }
    }

    if let Err(e) = std::fs::create_dir_all(&config.build.output) {
        log!("watch"; "failed to create {}: {}", config.build.output.display(), e);
    }
    let output = SourceSet::new(&config.build.output, &[OUTPUT_RELOAD_GLOB.to_string()])
        .and_then(|set| CategoryWatcher::new("output", set, WatchAction::Reload, debounce));
    match output {
        Ok(watcher) => {
            tokio::spawn(watcher.run(ctx.clone()));
            watching += 1;
        }
        Err(e) => log!("watch"; "output: {:#}", e),
    }

    log!("watch"; "{} running", crate::utils::plural_count(watching, "watcher"));

    // Blocks a worker-pool thread, not the runtime.
    let _ = tokio::task::spawn_blocking(move || shutdown_rx.recv()).await;

    handle.shutdown();
    let _ = hub_task.await;
}
