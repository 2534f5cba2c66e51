//! Preview HTTP server for the output directory.
//!
//! Serves files from `build.output` and injects the live-reload client into
//! HTML responses. Requests are handled on a small rayon pool so a slow
//! transfer never blocks the accept loop.

mod inject;
mod lifecycle;
mod path;
mod response;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use crossbeam::channel;
use tiny_http::{Method, Request, Server};

use crate::config::PipelineConfig;
use crate::embed::serve::LIVERELOAD_URL;
use crate::log;

/// Request worker threads
const REQUEST_THREADS: usize = 4;

/// Bound server ready to accept requests.
pub struct BoundServer {
    server: Arc<Server>,
    root: PathBuf,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server and register it for Ctrl+C shutdown.
pub fn bind_server(config: &PipelineConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        root: config.build.output.clone(),
        shutdown_rx,
    })
}

impl BoundServer {
    /// Receiver signalled once when shutdown is requested.
    pub fn shutdown_signal(&self) -> channel::Receiver<()> {
        self.shutdown_rx.clone()
    }

    /// Serve until shutdown. HTML gets the live-reload client when
    /// `ws_port` is set.
    pub fn run(self, ws_port: Option<u16>) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(REQUEST_THREADS)
            .thread_name(|i| format!("serve-{i}"))
            .build()
            .context("failed to create request thread pool")?;

        let root = Arc::new(self.root);
        for request in self.server.incoming_requests() {
            let root = Arc::clone(&root);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &root, ws_port) {
                    log!("serve"; "request error: {e:#}");
                }
            });
        }
        Ok(())
    }
}

fn handle_request(request: Request, root: &Path, ws_port: Option<u16>) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_not_allowed(request);
    }

    let url = request.url().to_string();
    if let Some(port) = ws_port
        && path::strip_query(&url) == LIVERELOAD_URL
    {
        return response::respond_livereload_js(request, port);
    }

    match path::resolve_path(&url, root) {
        Some(file) => response::respond_file(request, &file, ws_port),
        None => response::respond_not_found(request, root, ws_port),
    }
}
