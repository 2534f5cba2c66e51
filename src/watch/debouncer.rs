//! Event coalescing for one watched category.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use notify::EventKind;
use notify::event::ModifyKind;
use rustc_hash::FxHashMap;

use crate::debug;

/// What happened to a file within one debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// Collects changes until the window has been quiet for `delay`.
pub struct Debouncer {
    delay: Duration,
    changes: FxHashMap<PathBuf, ChangeKind>,
    last_event: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            changes: FxHashMap::default(),
            last_event: None,
        }
    }

    /// Merge a notify event into the pending changes.
    pub fn add_event(&mut self, event: &notify::Event) {
        let kind = match event.kind {
            EventKind::Create(_) => ChangeKind::Created,
            EventKind::Remove(_) => ChangeKind::Removed,
            EventKind::Modify(ModifyKind::Metadata(_)) => return,
            EventKind::Modify(_) => ChangeKind::Modified,
            _ => return,
        };

        for path in event.paths.iter().filter(|p| !is_temp_file(p)) {
            self.last_event = Some(Instant::now());
            let existing = self.changes.get(path).copied();
            if existing.is_none() {
                debug!("watch"; "{}: {}", kind.label(), path.display());
            }
            match merge(existing, kind) {
                Some(merged) => self.changes.insert(path.clone(), merged),
                None => self.changes.remove(path),
            };
        }
    }

    /// Take the pending changes once the window has been quiet long enough.
    pub fn take_if_ready(&mut self) -> Option<FxHashMap<PathBuf, ChangeKind>> {
        let last_event = self.last_event?;
        if last_event.elapsed() < self.delay {
            return None;
        }

        self.last_event = None;
        let changes = std::mem::take(&mut self.changes);
        (!changes.is_empty()).then_some(changes)
    }

    /// Time until the window may close; a day when idle.
    pub fn sleep_duration(&self) -> Duration {
        match self.last_event {
            Some(last_event) => self
                .delay
                .saturating_sub(last_event.elapsed())
                .max(Duration::from_millis(1)),
            None => Duration::from_secs(86400),
        }
    }
}

/// Combine a pending change with a newer one; `None` drops the path.
///
/// - removed, then created/modified: the later event wins
/// - modified, then removed: removed
/// - created, then removed: never existed
/// - otherwise the first event wins
fn merge(pending: Option<ChangeKind>, next: ChangeKind) -> Option<ChangeKind> {
    use ChangeKind::*;
    match (pending, next) {
        (None, next) | (Some(Removed), next @ (Created | Modified)) => Some(next),
        (Some(Modified), Removed) => Some(Removed),
        (Some(Created), Removed) => None,
        (Some(pending), _) => Some(pending),
    }
}

/// Editor swap and backup files, and dotfiles.
fn is_temp_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with('.')
        || name.ends_with('~')
        || [".bak", ".swp", ".swo", ".tmp"].iter().any(|ext| name.ends_with(ext))
}
