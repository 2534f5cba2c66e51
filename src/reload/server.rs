//! WebSocket acceptor for live reload.
//!
//! Accepts TCP connections on a background thread. Each connection is
//! upgraded on its own short-lived thread, and only finished WebSockets
//! reach the reload hub.

use std::net::{IpAddr, SocketAddr, TcpListener, TcpStream};
use std::time::Duration;

use anyhow::{Context, Result};
use tungstenite::WebSocket;

use super::ReloadHandle;
use crate::core::is_shutdown;

/// Maximum port retry attempts
const MAX_PORT_RETRIES: u16 = 10;

/// Accept poll interval while idle
const ACCEPT_POLL: Duration = Duration::from_millis(100);

/// A client must finish the upgrade request within this time.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Start the acceptor thread, returning the port actually bound.
///
/// Taken ports are retried upward, like the HTTP server.
pub fn start_ws_server(interface: IpAddr, base_port: u16, hub: ReloadHandle) -> Result<u16> {
    let (listener, actual_port) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;
    listener
        .set_nonblocking(true)
        .context("failed to configure live-reload listener")?;

    std::thread::Builder::new()
        .name("reload-accept".into())
        .spawn(move || {
            while !is_shutdown() {
                match listener.accept() {
                    Ok((stream, addr)) => {
                        crate::debug!("reload"; "connection from {}", addr);
                        let hub = hub.clone();
                        let spawned = std::thread::Builder::new()
                            .name("reload-handshake".into())
                            .spawn(move || match handshake(stream) {
                                Ok(ws) => {
                                    hub.add_client(ws);
                                }
                                Err(e) => crate::log!("reload"; "handshake failed: {:#}", e),
                            });
                        if let Err(e) = spawned {
                            crate::log!("reload"; "failed to spawn handshake thread: {}", e);
                        }
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        std::thread::sleep(ACCEPT_POLL);
                    }
                    Err(e) => {
                        crate::log!("reload"; "accept error: {}", e);
                        std::thread::sleep(ACCEPT_POLL);
                    }
                }
            }
        })
        .context("failed to spawn live-reload acceptor")?;

    Ok(actual_port)
}

/// Upgrade a raw connection to a blocking WebSocket.
fn handshake(stream: TcpStream) -> Result<WebSocket<TcpStream>> {
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(Some(HANDSHAKE_TIMEOUT))?;
    let ws = tungstenite::accept(stream).map_err(|e| anyhow::anyhow!("{e}"))?;
    ws.get_ref().set_read_timeout(None)?;
    Ok(ws)
}

/// Try binding to port, retry with incremented port if in use
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(TcpListener, u16)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        match TcpListener::bind(SocketAddr::new(interface, port)) {
            Ok(listener) => {
                let actual_port = listener.local_addr()?.port();
                return Ok((listener, actual_port));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "failed to bind live-reload server after {} attempts: {}",
        max_retries,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}
