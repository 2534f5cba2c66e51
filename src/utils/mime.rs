//! Content-Type lookup for files served by the preview server.

use std::path::Path;

pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml";
    pub const MANIFEST: &str = "application/manifest+json";
    pub const OCTET_STREAM: &str = "application/octet-stream";

    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";

    pub const WOFF: &str = "font/woff";
    pub const WOFF2: &str = "font/woff2";
    pub const TTF: &str = "font/ttf";
    pub const OTF: &str = "font/otf";
    pub const EOT: &str = "application/vnd.ms-fontobject";
}

/// Extensions (lowercase) and the Content-Type they are served with.
const BY_EXTENSION: &[(&[&str], &str)] = &[
    (&["html", "htm"], types::HTML),
    (&["css"], types::CSS),
    (&["js", "mjs", "cjs"], types::JAVASCRIPT),
    (&["json", "map"], types::JSON),
    (&["webmanifest"], types::MANIFEST),
    (&["xml"], types::XML),
    (&["txt"], types::PLAIN),
    (&["png"], types::PNG),
    (&["jpg", "jpeg"], types::JPEG),
    (&["gif"], types::GIF),
    (&["webp"], types::WEBP),
    (&["avif"], types::AVIF),
    (&["svg"], types::SVG),
    (&["ico"], types::ICO),
    (&["woff"], types::WOFF),
    (&["woff2"], types::WOFF2),
    (&["ttf"], types::TTF),
    (&["otf"], types::OTF),
    (&["eot"], types::EOT),
];

/// Content-Type of a file, `application/octet-stream` when unknown.
pub fn from_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return types::OCTET_STREAM;
    };
    let ext = ext.to_ascii_lowercase();
    BY_EXTENSION
        .iter()
        .find(|(exts, _)| exts.contains(&ext.as_str()))
        .map_or(types::OCTET_STREAM, |&(_, mime)| mime)
}
