//! Path helpers for the project root, source maps and URLs.

use std::path::{Component, Path, PathBuf};

/// Absolute form of `path`: canonical when it exists, otherwise joined onto
/// the current directory.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    }
}

/// Compute the path of `target` as seen from directory `from`.
///
/// Both paths should be absolute. Used for source map `sources` entries,
/// which are resolved relative to the map file.
///
/// # Example
/// ```ignore
/// relative_to(Path::new("/site/dist/js"), Path::new("/site/src/scripts/app.js"))
///     // -> "../../src/scripts/app.js"
/// ```
pub fn relative_to(from: &Path, target: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();

    let common = from
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..from.len() {
        result.push("..");
    }
    for component in &target[common..] {
        result.push(component.as_os_str());
    }
    result
}

/// Render a relative path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
