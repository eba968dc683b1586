//! File system watcher using notify-rs.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::debounce::{debounce_loop, ChangeCallback};
use crate::error::WatcherError;
use crate::Result;

/// Default quiet interval before a change burst triggers the callback.
pub const DEBOUNCE_DURATION: Duration = Duration::from_secs(1);

/// Live subscription state, replaced wholesale by every `start`.
struct ActiveWatch {
    _watcher: RecommendedWatcher,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    dirs: Vec<PathBuf>,
}

/// Watches directory trees and reports bursts of changes through one
/// debounced async callback.
///
/// The notify backend only pushes a unit signal into a length-1 channel;
/// the debounce timer lives inside a single spawned task that owns it.
pub struct FileWatcher {
    debounce: Duration,
    active: Option<ActiveWatch>,
}

impl std::fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWatcher")
            .field("debounce", &self.debounce)
            .field("watched_dirs", &self.watched_dirs())
            .finish()
    }
}

impl Default for FileWatcher {
    fn default() -> Self {
        Self::new(DEBOUNCE_DURATION)
    }
}

impl FileWatcher {
    /// Create a stopped watcher with the given quiet interval.
    #[must_use]
    pub const fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            active: None,
        }
    }

    /// Start watching `dirs` recursively, replacing any previous subscription.
    ///
    /// Paths that are not existing directories, or cannot be watched, are
    /// skipped.
    /// Must be called from within a tokio runtime. Returns the number of
    /// directories actually watched; with zero the watcher stays stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS notification backend cannot be created.
    pub fn start<F, Fut>(&mut self, dirs: &[PathBuf], on_change: F) -> Result<usize>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.stop();

        let existing: Vec<PathBuf> = dirs.iter().filter(|d| d.is_dir()).cloned().collect();
        if existing.is_empty() {
            tracing::debug!("No existing directories to watch");
            return Ok(0);
        }

        let (signal_tx, signal_rx) = mpsc::channel(1);
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            match result {
                Ok(event) if is_change(&event.kind) => {
                    // A full channel already holds a pending signal.
                    let _ = signal_tx.try_send(());
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Watch error: {e}"),
            }
        })
        .map_err(|e| WatcherError::Init(e.to_string()))?;

        let mut watched = Vec::with_capacity(existing.len());
        for dir in existing {
            match watcher.watch(&dir, RecursiveMode::Recursive) {
                Ok(()) => watched.push(dir),
                Err(e) => {
                    let err = WatcherError::WatchFailed {
                        path: dir.display().to_string(),
                        reason: e.to_string(),
                    };
                    tracing::warn!("{err}, skipping");
                }
            }
        }
        if watched.is_empty() {
            return Ok(0);
        }

        let on_change: ChangeCallback =
            Arc::new(move || -> BoxFuture<'static, ()> { Box::pin(on_change()) });
        let cancel = CancellationToken::new();
        let task = tokio::spawn(debounce_loop(
            signal_rx,
            self.debounce,
            cancel.clone(),
            on_change,
        ));

        let count = watched.len();
        tracing::info!(dirs = count, "File watcher started");
        self.active = Some(ActiveWatch {
            _watcher: watcher,
            cancel,
            task,
            dirs: watched,
        });
        Ok(count)
    }

    /// Cancel all subscriptions and any pending debounce timer.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
            active.task.abort();
            tracing::info!("File watcher stopped");
        }
    }

    /// Whether a subscription is active.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Directories currently watched.
    #[must_use]
    pub fn watched_dirs(&self) -> Vec<PathBuf> {
        self.active
            .as_ref()
            .map(|a| a.dirs.clone())
            .unwrap_or_default()
    }

    /// Quiet interval.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        self.debounce
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Reads are not changes; the rescan itself opens files.
const fn is_change(kind: &EventKind) -> bool {
    !matches!(kind, EventKind::Access(_))
}
