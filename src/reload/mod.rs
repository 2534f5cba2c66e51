//! Live reload over WebSocket.
//!
//! # Architecture
//!
//! ```text
//! tasks / output watcher --ReloadHandle--> ReloadHub --broadcast--> browsers
//!                                            ^
//! acceptor thread --------AddClient----------+
//! ```
//!
//! - `message` - JSON messages sent to clients (connected, reload, css)
//! - `hub` - actor owning the client list
//! - `server` - TCP acceptor handing new connections to the hub

mod hub;
pub mod message;
mod server;

pub use hub::{ReloadHandle, ReloadHub};
pub use message::ReloadMessage;
pub use server::start_ws_server;
