//! Sitemap generation.
//!
//! Lists every markup file of the output tree for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01T08:00:00Z</lastmod>
//!   </url>
//! </urlset>
//! ```

use std::borrow::Cow;
use std::fmt::Write;
use std::path::Path;
use std::time::SystemTime;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::utils::{date::DateTimeUtc, path::to_slash};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Characters escaped inside a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Page list rendered as a `<urlset>` document.
#[derive(Default)]
pub struct Sitemap {
    urls: Vec<(String, Option<String>)>,
}

impl Sitemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page given its path relative to the site root.
    pub fn push_page(&mut self, origin: &str, relative: &Path, modified: Option<SystemTime>) {
        let lastmod = modified.map(|t| DateTimeUtc::from_system_time(t).to_rfc3339());
        self.urls.push((page_url(origin, relative), lastmod));
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::new();
        // fmt::Write into a String cannot fail
        let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(xml, r#"<urlset xmlns="{SITEMAP_NS}">"#);
        for (loc, lastmod) in &self.urls {
            let _ = writeln!(xml, "  <url>\n    <loc>{}</loc>", escape_xml(loc));
            if let Some(lastmod) = lastmod {
                let _ = writeln!(xml, "    <lastmod>{lastmod}</lastmod>");
            }
            xml.push_str("  </url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }
}

/// Public URL of a page: `origin` + `/` + its percent-encoded relative path,
/// with a trailing `index.html` reduced to its directory.
///
/// `blog/index.html` -> `https://example.com/blog/`
pub fn page_url(origin: &str, relative: &Path) -> String {
    let slashed = to_slash(relative);
    let (dir_like, path) = match slashed.strip_suffix("index.html") {
        Some(rest) if rest.is_empty() || rest.ends_with('/') => (true, rest.trim_end_matches('/')),
        _ => (false, slashed.as_str()),
    };

    let encoded: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| utf8_percent_encode(s, PATH_SEGMENT).to_string())
        .collect();

    let mut url = format!("{}/{}", origin.trim_end_matches('/'), encoded.join("/"));
    if dir_like && !encoded.is_empty() {
        url.push('/');
    }
    url
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
