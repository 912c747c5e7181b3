//! Live reload manager.
//!
//! Coordinates file watching and WebSocket broadcasting for live reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::broadcast;
use tokio::sync::mpsc;

use super::debouncer::{ChangeDebouncer, ChangeKind, FileChange};

/// Signal sent to connected WebSocket clients when files change.
///
/// Carries no data: the wire payload is the fixed reload literal and the
/// client reloads unconditionally.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ReloadSignal;

/// Default debounce duration in milliseconds.
const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// How often debounced changes are drained.
const DRAIN_INTERVAL: Duration = Duration::from_millis(50);

/// Manages file watching and broadcasting reload signals.
pub(crate) struct LiveReloadManager {
    source_dir: PathBuf,
    watch_patterns: Vec<String>,
    broadcaster: broadcast::Sender<ReloadSignal>,
    watcher: Option<RecommendedWatcher>,
    debounce: Duration,
}

impl LiveReloadManager {
    /// Create a new live reload manager.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Directory to watch for changes
    /// * `watch_patterns` - Glob patterns to match (default: everything)
    /// * `broadcaster` - Broadcast channel sender for reload signals
    #[must_use]
    pub(crate) fn new(
        source_dir: PathBuf,
        watch_patterns: Option<Vec<String>>,
        broadcaster: broadcast::Sender<ReloadSignal>,
    ) -> Self {
        Self {
            source_dir,
            watch_patterns: watch_patterns.unwrap_or_else(|| vec!["**/*".to_owned()]),
            broadcaster,
            watcher: None,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    /// Set the debounce duration.
    #[must_use]
    pub(crate) fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start the file watcher.
    ///
    /// Spawns background tasks that watch for file changes and broadcast
    /// reload signals to connected WebSocket clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the file watcher cannot be created.
    pub(crate) fn start(&mut self) -> Result<(), notify::Error> {
        let (tx, mut rx) = mpsc::channel::<Event>(100);

        // Create watcher with callback that sends events to channel
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                // Use blocking_send since callback is sync
                let _ = tx.blocking_send(event);
            }
        })?;

        watcher.watch(&self.source_dir, RecursiveMode::Recursive)?;
        self.watcher = Some(watcher);

        let debouncer = Arc::new(ChangeDebouncer::new(self.debounce));

        // Task recording raw events into the debouncer
        let debouncer_for_record = Arc::clone(&debouncer);
        let watch_patterns = self.watch_patterns.clone();
        let source_dir = self.source_dir.clone();

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                Self::record_event(&event, &source_dir, &watch_patterns, &debouncer_for_record);
            }
        });

        // Task broadcasting debounced changes
        let broadcaster = self.broadcaster.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(DRAIN_INTERVAL);

            loop {
                interval.tick().await;

                for change in debouncer.take_ready() {
                    Self::broadcast_change(&change, &broadcaster);
                }
            }
        });

        Ok(())
    }

    /// Record a raw filesystem event into the debouncer.
    fn record_event(
        event: &Event,
        source_dir: &Path,
        watch_patterns: &[String],
        debouncer: &ChangeDebouncer,
    ) {
        let kind = match event.kind {
            EventKind::Create(_) => ChangeKind::Added,
            EventKind::Modify(_) => ChangeKind::Changed,
            EventKind::Remove(_) => ChangeKind::Deleted,
            _ => return,
        };

        for path in &event.paths {
            if !Self::matches_patterns(path, source_dir, watch_patterns) {
                continue;
            }

            debouncer.note(path.clone(), kind);
            tracing::debug!(path = %path.display(), ?kind, "Recorded filesystem event");
        }
    }

    /// Broadcast one debounced change as a reload signal.
    fn broadcast_change(change: &FileChange, broadcaster: &broadcast::Sender<ReloadSignal>) {
        // send only fails when no page is connected, which is fine
        let receivers = broadcaster.send(ReloadSignal).unwrap_or(0);

        tracing::info!(
            path = %change.path.display(),
            kind = ?change.kind,
            receivers,
            "File change, reload broadcast"
        );
    }

    /// Check if a path matches any watch pattern.
    fn matches_patterns(path: &Path, source_dir: &Path, patterns: &[String]) -> bool {
        let Ok(relative) = path.strip_prefix(source_dir) else {
            return false;
        };

        let relative_str = relative.to_string_lossy();

        patterns
            .iter()
            .filter_map(|p| glob::Pattern::new(p).ok())
            .any(|glob_pattern| glob_pattern.matches(&relative_str))
    }

    /// Get a receiver for reload signals.
    #[must_use]
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<ReloadSignal> {
        self.broadcaster.subscribe()
    }
}
