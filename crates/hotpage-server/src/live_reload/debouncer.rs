//! Filesystem event debouncing.
//!
//! Editors rarely produce a single event per save: temp-file renames,
//! metadata touches and double writes all show up within a few
//! milliseconds. The debouncer holds events per path for a short window
//! and merges whatever arrives in the meantime, so one save becomes one
//! reload.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// What happened to a file, after merging raw events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChangeKind {
    Added,
    Changed,
    Deleted,
}

impl ChangeKind {
    /// Merge a newly observed kind into an already pending one.
    ///
    /// Returns `None` when the pair cancels out: a file that was added and
    /// deleted within the window never existed as far as reloads go.
    fn merge(self, incoming: Self) -> Option<Self> {
        match (self, incoming) {
            (Self::Added, Self::Deleted) => None,
            // A write observed after an add is part of the add.
            (Self::Added, _) => Some(Self::Added),
            // A delete followed by an add is a replace, report a change.
            (Self::Deleted, Self::Added) => Some(Self::Changed),
            // Writes to a deleted path are stale, the delete stands.
            (Self::Deleted, _) => Some(Self::Deleted),
            (Self::Changed, incoming) => Some(incoming),
        }
    }
}

/// A merged change ready to be acted on.
#[derive(Clone, Debug)]
pub(crate) struct FileChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

struct Pending {
    kind: ChangeKind,
    ready_at: Instant,
}

/// Per-path event merger with a fixed hold window.
///
/// `note` is called from the watcher callback thread, `take_ready` from an
/// async task, hence the mutex.
pub(crate) struct ChangeDebouncer {
    window: Duration,
    pending: Mutex<HashMap<PathBuf, Pending>>,
}

impl ChangeDebouncer {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Record a raw event, restarting the hold window for its path.
    pub(crate) fn note(&self, path: PathBuf, kind: ChangeKind) {
        let mut pending = self.pending.lock().expect("debouncer lock poisoned");
        let ready_at = Instant::now() + self.window;

        match pending.remove(&path) {
            None => {
                pending.insert(path, Pending { kind, ready_at });
            }
            Some(existing) => {
                if let Some(merged) = existing.kind.merge(kind) {
                    pending.insert(
                        path,
                        Pending {
                            kind: merged,
                            ready_at,
                        },
                    );
                }
                // Cancelled pairs are dropped entirely.
            }
        }
    }

    /// Remove and return every change whose hold window has elapsed.
    pub(crate) fn take_ready(&self) -> Vec<FileChange> {
        let mut pending = self.pending.lock().expect("debouncer lock poisoned");
        let now = Instant::now();

        let ready: Vec<PathBuf> = pending
            .iter()
            .filter(|(_, p)| p.ready_at <= now)
            .map(|(path, _)| path.clone())
            .collect();

        ready
            .into_iter()
            .filter_map(|path| {
                pending.remove(&path).map(|p| FileChange {
                    path,
                    kind: p.kind,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const WINDOW: Duration = Duration::from_millis(10);

    fn settle() {
        thread::sleep(WINDOW + Duration::from_millis(5));
    }

    #[test]
    fn test_change_held_until_window_elapses() {
        let debouncer = ChangeDebouncer::new(WINDOW);
        debouncer.note(PathBuf::from("/site/index.html"), ChangeKind::Changed);

        assert!(debouncer.take_ready().is_empty());

        settle();
        let changes = debouncer.take_ready();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Changed);

        // Drained.
        assert!(debouncer.take_ready().is_empty());
    }

    #[test]
    fn test_burst_of_writes_becomes_one_change() {
        let debouncer = ChangeDebouncer::new(WINDOW);
        let path = PathBuf::from("/site/app.css");

        debouncer.note(path.clone(), ChangeKind::Changed);
        debouncer.note(path.clone(), ChangeKind::Changed);
        debouncer.note(path, ChangeKind::Changed);

        settle();
        assert_eq!(debouncer.take_ready().len(), 1);
    }

    #[test]
    fn test_add_then_delete_cancels_out() {
        let debouncer = ChangeDebouncer::new(WINDOW);
        let path = PathBuf::from("/site/tmp.html");

        debouncer.note(path.clone(), ChangeKind::Added);
        debouncer.note(path, ChangeKind::Deleted);

        settle();
        assert!(debouncer.take_ready().is_empty());
    }

    #[test]
    fn test_delete_then_add_is_a_replace() {
        let debouncer = ChangeDebouncer::new(WINDOW);
        let path = PathBuf::from("/site/index.html");

        debouncer.note(path.clone(), ChangeKind::Deleted);
        debouncer.note(path, ChangeKind::Added);

        settle();
        let changes = debouncer.take_ready();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Changed);
    }

    #[test]
    fn test_paths_are_independent() {
        let debouncer = ChangeDebouncer::new(WINDOW);
        debouncer.note(PathBuf::from("/site/a.html"), ChangeKind::Changed);
        debouncer.note(PathBuf::from("/site/b.html"), ChangeKind::Added);

        settle();
        assert_eq!(debouncer.take_ready().len(), 2);
    }

    #[test]
    fn test_merge_matrix() {
        use ChangeKind::{Added, Changed, Deleted};

        assert_eq!(Added.merge(Added), Some(Added));
        assert_eq!(Added.merge(Changed), Some(Added));
        assert_eq!(Added.merge(Deleted), None);

        assert_eq!(Changed.merge(Added), Some(Added));
        assert_eq!(Changed.merge(Changed), Some(Changed));
        assert_eq!(Changed.merge(Deleted), Some(Deleted));

        assert_eq!(Deleted.merge(Added), Some(Changed));
        assert_eq!(Deleted.merge(Changed), Some(Deleted));
        assert_eq!(Deleted.merge(Deleted), Some(Deleted));
    }
}
