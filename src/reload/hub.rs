//! Reload hub actor: owns the connected clients and broadcasts messages.

use std::net::TcpStream;

use tokio::sync::mpsc;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::message::ReloadMessage;

/// Messages handled by the hub.
#[derive(Debug)]
pub enum HubMsg {
    /// Send to every connected client
    Broadcast(ReloadMessage),
    /// Upgraded connection from the acceptor
    AddClient(WebSocket<TcpStream>),
    /// Close all clients and stop
    Shutdown,
}

/// Cloneable sender side of the hub.
#[derive(Debug, Clone)]
pub struct ReloadHandle {
    tx: mpsc::UnboundedSender<HubMsg>,
}

impl ReloadHandle {
    pub fn send(&self, msg: ReloadMessage) {
        if self.tx.send(HubMsg::Broadcast(msg)).is_err() {
            crate::debug!("reload"; "hub stopped, message dropped");
        }
    }

    pub fn add_client(&self, ws: WebSocket<TcpStream>) -> bool {
        self.tx.send(HubMsg::AddClient(ws)).is_ok()
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(HubMsg::Shutdown);
    }
}

/// Reload hub - manages client connections and broadcasts
pub struct ReloadHub {
    rx: mpsc::UnboundedReceiver<HubMsg>,
    clients: Vec<WebSocket<TcpStream>>,
}

impl ReloadHub {
    /// Create the hub and a handle to reach it.
    pub fn new() -> (Self, ReloadHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = Self {
            rx,
            clients: Vec::new(),
        };
        (hub, ReloadHandle { tx })
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                HubMsg::Broadcast(msg) => self.broadcast(&msg),
                HubMsg::AddClient(ws) => self.add_client(ws),
                HubMsg::Shutdown => {
                    crate::debug!("reload"; "shutting down");
                    for mut client in self.clients.drain(..) {
                        let _ = client.close(None);
                        let _ = client.flush();
                    }
                    break;
                }
            }
        }
    }

    fn add_client(&mut self, mut ws: WebSocket<TcpStream>) {
        let connected = ReloadMessage::Connected.to_json();
        if let Err(e) = ws.send(Message::Text(connected.into())) {
            crate::debug!("reload"; "failed to send connected message: {}", e);
            return;
        }
        self.clients.push(ws);
        crate::debug!("reload"; "client connected (total: {})", self.clients.len());
    }

    fn broadcast(&mut self, msg: &ReloadMessage) {
        if self.clients.is_empty() {
            crate::debug!("reload"; "no clients connected");
            return;
        }

        let frame = Message::Text(msg.to_json().into());
        self.clients
            .retain_mut(|client| match client.send(frame.clone()) {
                Ok(()) => true,
                Err(e) => {
                    crate::debug!("reload"; "client disconnected: {}", e);
                    false
                }
            });
        crate::debug!("reload"; "broadcast to {} clients", self.clients.len());
    }
}
