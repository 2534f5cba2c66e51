//! Glob resolution for source sets.
//!
//! A source set is an ordered list of gitignore-style globs relative to a
//! root directory. Patterns prefixed with `!` exclude matches. Every
//! positive pattern has a *glob base*: its leading components without glob
//! metacharacters. Output paths are computed relative to that base, so
//! `src/scss/**/*.scss` writes `src/scss/a/b.scss` as `a/b.css`.
//!
//! # Example
//!
//! ```ignore
//! let set = SourceSet::new(root, &["src/**/*.tera".into(), "!node_modules/**".into()])?;
//! for file in set.files()? {
//!     let out = dest.join(file.relative());
//! }
//! ```

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use ignore::overrides::{Override, OverrideBuilder};
use jwalk::{Parallelism, WalkDir};
use rustc_hash::FxHashSet;

/// Characters that start a glob expression.
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// File names never treated as sources.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// A file matched by a source set, with the base of the pattern that matched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub base: PathBuf,
}

impl SourceFile {
    /// Path relative to the glob base.
    pub fn relative(&self) -> &Path {
        self.path.strip_prefix(&self.base).unwrap_or(&self.path)
    }

    /// Whether the file name starts with `_` (partials are not emitted).
    pub fn is_partial(&self) -> bool {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('_'))
    }
}

/// One positive pattern with its own matcher.
struct Include {
    base: PathBuf,
    matcher: Override,
}

/// Resolved glob list rooted at a directory.
pub struct SourceSet {
    root: PathBuf,
    includes: Vec<Include>,
    excludes: Override,
}

impl SourceSet {
    /// Build a source set from patterns relative to `root`.
    pub fn new(root: &Path, patterns: &[String]) -> Result<Self> {
        let mut includes = Vec::new();
        let mut excludes = OverrideBuilder::new(root);

        for raw in patterns {
            let (negated, pattern) = split_pattern(raw);
            if pattern.is_empty() {
                bail!("empty glob pattern `{raw}`");
            }

            if negated {
                excludes
                    .add(pattern)
                    .with_context(|| format!("invalid glob `{raw}`"))?;
                continue;
            }

            let mut builder = OverrideBuilder::new(root);
            builder
                .add(pattern)
                .with_context(|| format!("invalid glob `{raw}`"))?;
            includes.push(Include {
                base: root.join(glob_base(pattern)),
                matcher: builder
                    .build()
                    .with_context(|| format!("invalid glob `{raw}`"))?,
            });
        }

        if includes.is_empty() {
            bail!("no positive glob pattern in {patterns:?}");
        }

        Ok(Self {
            root: root.to_path_buf(),
            includes,
            excludes: excludes.build().context("invalid exclusion globs")?,
        })
    }

    /// All matching files: patterns in declaration order, paths sorted within
    /// a pattern, each file reported once.
    ///
    /// The walk is serial: tasks calling this already run on rayon workers.
    pub fn files(&self) -> Result<Vec<SourceFile>> {
        let mut seen = FxHashSet::default();
        let mut files = Vec::new();

        for include in &self.includes {
            if !include.base.is_dir() {
                continue;
            }
            let mut matched = Vec::new();
            let walk = WalkDir::new(&include.base)
                .parallelism(Parallelism::Serial)
                .sort(true);
            for entry in walk {
                let entry = entry
                    .with_context(|| format!("failed to walk {}", include.base.display()))?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if !is_ignored_file(&path)
                    && include.matcher.matched(&path, false).is_whitelist()
                    && !self.is_excluded(&path)
                {
                    matched.push(path);
                }
            }
            matched.sort();

            for path in matched {
                if seen.insert(path.clone()) {
                    files.push(SourceFile {
                        path,
                        base: include.base.clone(),
                    });
                }
            }
        }
        Ok(files)
    }

    /// Resolve a single path against the set, returning its base on a match.
    pub fn resolve(&self, path: &Path) -> Option<SourceFile> {
        if is_ignored_file(path) || self.is_excluded(path) {
            return None;
        }
        self.includes
            .iter()
            .find(|inc| path.starts_with(&inc.base) && inc.matcher.matched(path, false).is_whitelist())
            .map(|inc| SourceFile {
                path: path.to_path_buf(),
                base: inc.base.clone(),
            })
    }

    /// Whether `path` belongs to the set.
    pub fn matches(&self, path: &Path) -> bool {
        self.resolve(path).is_some()
    }

    /// Directories to watch: each pattern's base, or its nearest existing
    /// ancestor inside the root when the base does not exist yet.
    pub fn watch_roots(&self) -> Vec<PathBuf> {
        let mut roots: Vec<PathBuf> = Vec::new();
        for include in &self.includes {
            let mut dir = include.base.clone();
            while !dir.is_dir() && dir != self.root {
                if !dir.pop() {
                    break;
                }
            }
            if !dir.is_dir() {
                continue;
            }
            if !roots.iter().any(|r| dir.starts_with(r)) {
                roots.retain(|r| !r.starts_with(&dir));
                roots.push(dir);
            }
        }
        roots
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.excludes.is_empty() {
            return false;
        }
        // Excluding a directory excludes everything beneath it.
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let mut current = self.root.clone();
        for component in rel.components() {
            current.push(component);
            let is_dir = current != path;
            if self.excludes.matched(&current, is_dir).is_whitelist() {
                return true;
            }
        }
        false
    }
}

/// Split off a leading `!` and a leading `./`.
fn split_pattern(raw: &str) -> (bool, &str) {
    let raw = raw.trim();
    let (negated, rest) = match raw.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    (negated, rest.strip_prefix("./").unwrap_or(rest))
}

/// Leading path components of `pattern` without glob metacharacters.
///
/// A pattern without any metacharacter names a single file; its base is the
/// parent directory.
pub fn glob_base(pattern: &str) -> PathBuf {
    let pattern = split_pattern(pattern).1;
    let path = Path::new(pattern);
    let is_literal = !pattern.contains(GLOB_META);

    let mut base = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(s) if !s.to_string_lossy().contains(GLOB_META) => base.push(s),
            Component::CurDir => {}
            _ => break,
        }
    }
    if is_literal {
        base.pop();
    }
    base
}

fn is_ignored_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| IGNORED_FILES.contains(&n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, file).unwrap();
        }
        dir
    }

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn relatives(set: &SourceSet) -> Vec<String> {
        set.files()
            .unwrap()
            .iter()
            .map(|f| crate::utils::path::to_slash(f.relative()))
            .collect()
    }

    #[test]
    fn test_glob_base() {
        assert_eq!(glob_base("src/**/*.tera"), PathBuf::from("src"));
        assert_eq!(glob_base("src/img/**"), PathBuf::from("src/img"));
        assert_eq!(glob_base("src/scss/**/*.scss"), PathBuf::from("src/scss"));
        assert_eq!(glob_base("dist/index.html"), PathBuf::from("dist"));
        assert_eq!(glob_base("./dist/**/*.html"), PathBuf::from("dist"));
        assert_eq!(glob_base("*.html"), PathBuf::new());
        assert_eq!(glob_base("src/{a,b}/*.js"), PathBuf::from("src"));
    }

    #[test]
    fn test_files_relative_to_base() {
        let dir = project(&["src/scss/main.scss", "src/scss/parts/_vars.scss", "src/other.txt"]);
        let set = SourceSet::new(dir.path(), &patterns(&["src/scss/**/*.scss"])).unwrap();
        assert_eq!(relatives(&set), vec!["main.scss", "parts/_vars.scss"]);
    }

    #[test]
    fn test_pattern_order_then_sorted() {
        let dir = project(&["src/b.css", "src/a.css", "src/z.scss", "src/y.scss"]);
        let set = SourceSet::new(dir.path(), &patterns(&["src/*.scss", "src/*.css"])).unwrap();
        assert_eq!(relatives(&set), vec!["y.scss", "z.scss", "a.css", "b.css"]);
    }

    #[test]
    fn test_duplicates_reported_once() {
        let dir = project(&["src/a.js"]);
        let set = SourceSet::new(dir.path(), &patterns(&["src/*.js", "src/**/*.js"])).unwrap();
        assert_eq!(set.files().unwrap().len(), 1);
    }

    #[test]
    fn test_negated_pattern_excludes() {
        let dir = project(&["src/index.tera", "src/vendor/lib.tera"]);
        let set =
            SourceSet::new(dir.path(), &patterns(&["src/**/*.tera", "!src/vendor/**"])).unwrap();
        assert_eq!(relatives(&set), vec!["index.tera"]);
    }

    #[test]
    fn test_negated_directory_excludes_subtree() {
        let dir = project(&["src/a.tera", "src/node_modules/pkg/b.tera"]);
        let set = SourceSet::new(dir.path(), &patterns(&["src/**/*.tera", "!src/node_modules"]))
            .unwrap();
        assert_eq!(relatives(&set), vec!["a.tera"]);
    }

    #[test]
    fn test_literal_pattern() {
        let dir = project(&["dist/index.html", "dist/about.html"]);
        let set = SourceSet::new(dir.path(), &patterns(&["dist/index.html"])).unwrap();
        assert_eq!(relatives(&set), vec!["index.html"]);
    }

    #[test]
    fn test_missing_base_yields_nothing() {
        let dir = project(&[]);
        let set = SourceSet::new(dir.path(), &patterns(&["src/fonts/**"])).unwrap();
        assert!(set.files().unwrap().is_empty());
    }

    #[test]
    fn test_files_inside_rayon_workers() {
        use rayon::prelude::*;

        let dir = project(&["src/a.js", "src/b.js", "src/c/d.js"]);
        let set = SourceSet::new(dir.path(), &patterns(&["src/**/*.js"])).unwrap();
        let counts: Vec<usize> = (0..8)
            .into_par_iter()
            .map(|_| set.files().unwrap().len())
            .collect();
        assert_eq!(counts, vec![3; 8]);
    }

    #[test]
    fn test_requires_positive_pattern() {
        let dir = project(&[]);
        assert!(SourceSet::new(dir.path(), &patterns(&["!src/**"])).is_err());
        assert!(SourceSet::new(dir.path(), &patterns(&[""])).is_err());
    }

    #[test]
    fn test_matches_and_resolve() {
        let dir = project(&["src/img/a/logo.png"]);
        let set = SourceSet::new(dir.path(), &patterns(&["src/img/**"])).unwrap();
        let path = dir.path().join("src/img/a/logo.png");
        let resolved = set.resolve(&path).unwrap();
        assert_eq!(resolved.relative(), Path::new("a/logo.png"));
        assert!(!set.matches(&dir.path().join("src/fonts/a.woff")));
        assert!(!set.matches(&dir.path().join("src/img/.DS_Store")));
    }

    #[test]
    fn test_watch_roots_fall_back_to_existing_ancestor() {
        let dir = project(&["src/keep.txt"]);
        let set = SourceSet::new(dir.path(), &patterns(&["src/scripts/**/*.js"])).unwrap();
        assert_eq!(set.watch_roots(), vec![dir.path().join("src")]);
    }

    #[test]
    fn test_watch_roots_nested_collapse() {
        let dir = project(&["src/scss/a.scss"]);
        let set =
            SourceSet::new(dir.path(), &patterns(&["src/**/*.html", "src/scss/**/*.scss"])).unwrap();
        assert_eq!(set.watch_roots(), vec![dir.path().join("src")]);
    }

    #[test]
    fn test_is_partial() {
        let file = SourceFile {
            path: PathBuf::from("/p/src/_layout.tera"),
            base: PathBuf::from("/p/src"),
        };
        assert!(file.is_partial());
    }
}
