//! Core types shared across tasks, watchers and the preview server.

mod category;
mod state;

pub use category::Category;
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
