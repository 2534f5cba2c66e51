//! Config file discovery.

use std::path::{Path, PathBuf};

/// Search for `config_name` in `start` and each of its ancestors.
///
/// An absolute `config_name` is returned as-is when it exists.
///
/// ```text
/// /home/user/site/src/scss/       ← start
/// /home/user/site/sitepipe.toml   ← found
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}
