//! Live-reload script injection into HTML responses.

use crate::embed::serve::LIVERELOAD_URL;

const BODY_CLOSE: &[u8] = b"</body>";

/// Inject the client script when `content_type` is HTML and live reload is on.
pub fn maybe_inject_livereload(body: Vec<u8>, content_type: &str, ws_port: Option<u16>) -> Vec<u8> {
    match ws_port {
        Some(_) if content_type.starts_with("text/html") => inject_script(&body),
        _ => body,
    }
}

/// Insert the script tag before the last `</body>`, or append it when the
/// document has none.
fn inject_script(content: &[u8]) -> Vec<u8> {
    let tag = format!("<script src=\"{LIVERELOAD_URL}\"></script>");
    let pos = content
        .windows(BODY_CLOSE.len())
        .rposition(|w| w.eq_ignore_ascii_case(BODY_CLOSE))
        .unwrap_or(content.len());

    let mut result = Vec::with_capacity(content.len() + tag.len());
    result.extend_from_slice(&content[..pos]);
    result.extend_from_slice(tag.as_bytes());
    result.extend_from_slice(&content[pos..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::mime::types;

    fn inject(html: &str) -> String {
        String::from_utf8(maybe_inject_livereload(html.as_bytes().to_vec(), types::HTML, Some(1))).unwrap()
    }

    #[test]
    fn test_before_last_body_close() {
        assert_eq!(
            inject("<body><pre></body></pre></BODY>"),
            "<body><pre></body></pre><script src=\"/__sitepipe/livereload.js\"></script></BODY>"
        );
    }

    #[test]
    fn test_appended_without_body() {
        assert_eq!(
            inject("<p>fragment</p>"),
            "<p>fragment</p><script src=\"/__sitepipe/livereload.js\"></script>"
        );
    }

    #[test]
    fn test_non_html_untouched() {
        let css = b".a{}".to_vec();
        assert_eq!(maybe_inject_livereload(css.clone(), types::CSS, Some(1)), css);
    }

    #[test]
    fn test_disabled_without_port() {
        let html = b"<body></body>".to_vec();
        assert_eq!(maybe_inject_livereload(html.clone(), types::HTML, None), html);
    }
}
