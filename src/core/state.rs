//! Process-wide shutdown state.
//!
//! Ctrl+C is the only way out of watch mode. The handler sets a flag checked
//! between task graph phases, unblocks the HTTP server and wakes the watch
//! runtime through a crossbeam channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use anyhow::anyhow;
use crossbeam::channel::Sender;
use tiny_http::Server;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Present once the preview server is up.
static LISTENERS: OnceLock<Listeners> = OnceLock::new();

struct Listeners {
    server: Arc<Server>,
    watch: Sender<()>,
}

/// Install the Ctrl+C handler.
///
/// One-shot builds exit with status 130. Once a server is registered, the
/// handler winds it down instead.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if LISTENERS.get().is_none() {
            std::process::exit(130);
        }
        crate::log!("serve"; "shutting down...");
        request_shutdown();
    })
    .map_err(|e| anyhow!("failed to set Ctrl+C handler: {e}"))
}

/// Hand the bound server and the watch runtime's wake-up channel to the
/// Ctrl+C handler. Later registrations are ignored.
pub fn register_server(server: Arc<Server>, watch: Sender<()>) {
    let _ = LISTENERS.set(Listeners { server, watch });
}

fn request_shutdown() {
    SHUTDOWN.store(true, Ordering::SeqCst);
    if let Some(listeners) = LISTENERS.get() {
        let _ = listeners.watch.send(());
        listeners.server.unblock();
    }
}

pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
