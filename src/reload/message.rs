//! Live reload message protocol.
//!
//! # Message Types
//!
//! - `connected`: handshake acknowledgement
//! - `reload`: full page reload
//! - `css`: re-fetch one stylesheet without reloading the page

use serde::{Deserialize, Serialize};

/// Message sent over the live-reload WebSocket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReloadMessage {
    /// Connection established
    Connected,

    /// Full page reload
    Reload {
        /// What changed, shown in the browser console
        reason: String,
    },

    /// Stylesheet refresh
    Css {
        /// URL path of the stylesheet, e.g. `/css/style.min.css`
        path: String,
    },
}

impl ReloadMessage {
    pub fn reload(reason: impl Into<String>) -> Self {
        Self::Reload {
            reason: reason.into(),
        }
    }

    pub fn css(path: impl Into<String>) -> Self {
        Self::Css { path: path.into() }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"reload","reason":""}"#.into())
    }
}
