//! sitepipe - A static site asset pipeline with a live-reloading preview.

mod cli;
mod compiler;
mod config;
mod core;
mod embed;
mod freshness;
mod generator;
mod logger;
mod pipeline;
mod reload;
mod serve;
mod task;
mod utils;
mod watch;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PipelineConfig;
use pipeline::TaskGraph;
use task::TaskContext;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    logger::set_verbose(cli.verbose);

    let mut config = PipelineConfig::load(&cli.config)?;
    if let Some(serve_args) = cli.command.as_ref().and_then(Commands::serve_args) {
        serve_args.apply(&mut config.serve);
        config.validate()?;
    }
    let config = Arc::new(config);

    match &cli.command {
        None | Some(Commands::Default { .. }) => {
            run_graph(&TaskGraph::default_build(), &config)?;
            serve_and_watch(config)
        }
        Some(Commands::Watch { .. }) => serve_and_watch(config),
        Some(command) => match command.task() {
            Some(task) => run_graph(&TaskGraph::single(task), &config),
            None => Ok(()),
        },
    }
}

/// Run a task graph to completion, logging the elapsed time.
fn run_graph(graph: &TaskGraph, config: &Arc<PipelineConfig>) -> Result<()> {
    let ctx = TaskContext::new(Arc::clone(config));
    let start = Instant::now();
    let reports = graph.run(&ctx)?;
    debug!("build"; "{} finished in {:.2?}", utils::plural_count(reports.len(), "task"), start.elapsed());
    Ok(())
}

/// Preview server in the foreground, watchers in the background, until Ctrl+C.
fn serve_and_watch(config: Arc<PipelineConfig>) -> Result<()> {
    let server = serve::bind_server(&config)?;
    let watch = watch::spawn(Arc::clone(&config), server.shutdown_signal())?;

    server.run(Some(watch.ws_port))?;
    watch.join();
    Ok(())
}
