//! `[serve]` and `[watch]` sections.
//!
//! ```toml
//! [serve]
//! interface = "0.0.0.0"   # expose the preview on the LAN
//! port = 3000
//! reload_port = 35729     # live-reload WebSocket
//!
//! [watch]
//! debounce_ms = 200
//! ```
//!
//! A taken port is retried upward at startup.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Preview server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Address the preview and live-reload servers bind to. Loopback by default.
    pub interface: IpAddr,
    pub port: u16,
    pub reload_port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            reload_port: 35729,
        }
    }
}

impl ServeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.port == self.reload_port {
            diag.error_with_hint(
                "serve.reload_port",
                format!("port {} is already used by the HTTP server", self.port),
                "pick distinct ports for `port` and `reload_port`",
            );
        }
    }
}

/// File watcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Debounce window in milliseconds.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 200 }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_serve_config() {
        let config =
            test_parse_config("[serve]\ninterface = \"0.0.0.0\"\nport = 8080\nreload_port = 9000");

        assert_eq!(config.serve.interface, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.serve.reload_port, 9000);
    }

    #[test]
    fn test_serve_config_defaults() {
        let config = test_parse_config("");

        assert!(config.serve.interface.is_loopback());
        assert_eq!(config.serve.port, 3000);
        assert_eq!(config.serve.reload_port, 35729);
        assert_eq!(config.watch.debounce_ms, 200);
    }

    #[test]
    fn test_serve_config_ipv6() {
        let config = test_parse_config("[serve]\ninterface = \"::1\"");
        assert_eq!(config.serve.interface, IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[test]
    fn test_port_clash() {
        let config = test_parse_config("[serve]\nport = 4000\nreload_port = 4000");
        let mut diag = ConfigDiagnostics::new();
        config.serve.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
