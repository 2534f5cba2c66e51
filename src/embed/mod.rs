//! Assets compiled into the binary.

mod template;

pub use template::{Template, TemplateVars};

pub mod serve {
    use super::{Template, TemplateVars};

    /// URL the preview server answers with the live-reload client.
    pub const LIVERELOAD_URL: &str = "/__sitepipe/livereload.js";

    /// Variables for livereload.js.
    pub struct LivereloadVars {
        pub ws_port: u16,
    }

    impl TemplateVars for LivereloadVars {
        fn apply(&self, content: &str) -> String {
            content.replace("__WS_PORT__", &self.ws_port.to_string())
        }
    }

    /// Live-reload client with the WebSocket port injected.
    pub const LIVERELOAD_JS: Template<LivereloadVars> =
        Template::new(include_str!("serve/livereload.js"));

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_port_injected() {
            let js = LIVERELOAD_JS.render(&LivereloadVars { ws_port: 35730 });
            assert!(js.contains("var port = 35730;"));
            assert!(!js.contains("__WS_PORT__"));
        }
    }
}
