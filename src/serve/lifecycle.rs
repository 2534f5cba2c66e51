//! Server binding and shutdown registration.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Result, anyhow};
use crossbeam::channel::Sender;
use tiny_http::Server;

use crate::core::register_server;
use crate::log;

/// Ports tried before giving up.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind `interface:base_port`, moving up one port at a time while taken.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        match Server::http(SocketAddr::new(interface, port)) {
            Ok(server) => {
                let addr = server
                    .server_addr()
                    .to_ip()
                    .unwrap_or_else(|| SocketAddr::new(interface, port));
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, addr.port());
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Hand the server to the Ctrl+C handler, which unblocks it and signals
/// `shutdown_tx`.
pub fn register_for_shutdown(server: Arc<Server>, shutdown_tx: Sender<()>) {
    register_server(server, shutdown_tx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, TcpListener};

    #[test]
    fn test_skips_taken_port() {
        let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let taken = TcpListener::bind(SocketAddr::new(localhost, 0)).unwrap();
        let port = taken.local_addr().unwrap().port();

        match bind_with_retry(localhost, port) {
            Ok((_server, addr)) => assert_ne!(addr.port(), port),
            // Every following port may be taken on a busy machine.
            Err(e) => assert!(e.to_string().contains("failed to bind")),
        }
    }
}
