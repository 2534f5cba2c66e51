//! URL to filesystem path resolution.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Map a request URL onto a file under `root`.
///
/// Directories resolve to their `index.html`. Anything that would leave
/// `root`, through `..` or a symlink, resolves to nothing.
pub fn resolve_path(url: &str, root: &Path) -> Option<PathBuf> {
    let decoded = percent_decode_str(strip_query(url)).decode_utf8().ok()?;
    let relative = Path::new(decoded.trim_matches('/'));

    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }

    let canonical = root.join(relative).canonicalize().ok()?;
    if !canonical.starts_with(root.canonicalize().ok()?) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }
    let index = canonical.join("index.html");
    index.is_file().then_some(index)
}

/// Drop the query string and fragment.
pub fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("site/blog")).unwrap();
        fs::write(dir.path().join("site/index.html"), "home").unwrap();
        fs::write(dir.path().join("site/blog/index.html"), "blog").unwrap();
        fs::write(dir.path().join("site/my page.html"), "spaced").unwrap();
        fs::write(dir.path().join("secret.txt"), "secret").unwrap();
        dir
    }

    #[test]
    fn test_directories_resolve_to_index() {
        let dir = site();
        let root = dir.path().join("site");
        let canonical = root.canonicalize().unwrap();

        assert_eq!(resolve_path("/", &root), Some(canonical.join("index.html")));
        assert_eq!(resolve_path("/blog", &root), Some(canonical.join("blog/index.html")));
        assert_eq!(resolve_path("/blog/?x=1", &root), Some(canonical.join("blog/index.html")));
    }

    #[test]
    fn test_percent_decoding() {
        let dir = site();
        let root = dir.path().join("site");
        assert!(resolve_path("/my%20page.html", &root).is_some());
    }

    #[test]
    fn test_traversal_rejected() {
        let dir = site();
        let root = dir.path().join("site");
        assert_eq!(resolve_path("/../secret.txt", &root), None);
        assert_eq!(resolve_path("/%2e%2e/secret.txt", &root), None);
        assert_eq!(resolve_path("/blog/../../secret.txt", &root), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_rejected() {
        let dir = site();
        let root = dir.path().join("site");
        std::os::unix::fs::symlink(dir.path().join("secret.txt"), root.join("link.txt")).unwrap();
        assert_eq!(resolve_path("/link.txt", &root), None);
    }

    #[test]
    fn test_missing() {
        let dir = site();
        assert_eq!(resolve_path("/nope.html", &dir.path().join("site")), None);
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/a.css?t=1"), "/a.css");
        assert_eq!(strip_query("/a#top"), "/a");
        assert_eq!(strip_query("/"), "/");
    }
}
