//! Mtime-based freshness checks between a source and its output.

use std::path::Path;
use std::time::SystemTime;

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Check if `output` must be regenerated from `source`.
///
/// Stale when the output is missing, either mtime is unreadable, or the
/// source was modified after the output. Equal mtimes count as fresh.
pub fn is_stale(source: &Path, output: &Path) -> bool {
    let (Some(source_time), Some(output_time)) = (get_mtime(source), get_mtime(output)) else {
        return true;
    };
    source_time > output_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{FileTime, set_file_mtime};
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path, secs: i64) {
        fs::write(path, b"x").unwrap();
        set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
    }

    #[test]
    fn test_missing_output_is_stale() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.png");
        touch(&source, 1_000);
        assert!(is_stale(&source, &dir.path().join("out.png")));
    }

    #[test]
    fn test_newer_source_is_stale() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.png");
        let output = dir.path().join("b.png");
        touch(&output, 1_000);
        touch(&source, 2_000);
        assert!(is_stale(&source, &output));
    }

    #[test]
    fn test_older_or_equal_source_is_fresh() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.png");
        let output = dir.path().join("b.png");
        touch(&source, 1_000);
        touch(&output, 2_000);
        assert!(!is_stale(&source, &output));

        touch(&source, 2_000);
        assert!(!is_stale(&source, &output));
    }

    #[test]
    fn test_get_mtime_missing() {
        assert!(get_mtime(Path::new("/nonexistent/file.png")).is_none());
    }
}
