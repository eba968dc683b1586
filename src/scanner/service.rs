//! Single-flight scanning off the async executor.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::walker::scan_roots;
use crate::catalog::ScanReport;
use crate::{Error, Result};

/// Runs scans on a blocking worker, at most one at a time.
///
/// Cloning shares the in-flight flag, so clones handed to the watcher and
/// to the UI still refuse to overlap.
#[derive(Debug, Clone)]
pub struct Scanner {
    home: PathBuf,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the blocking walk finishes.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Scanner {
    /// Create a scanner classifying scope relative to `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a scan is currently running.
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Scan `roots` and classify the result.
    ///
    /// Returns `Ok(None)` without doing anything when another scan is
    /// already running; the request is dropped, not queued.
    ///
    /// # Errors
    ///
    /// Returns an error if the blocking scan task panics or is cancelled.
    pub async fn scan(&self, roots: Vec<PathBuf>) -> Result<Option<ScanReport>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Scan already in progress, request dropped");
            return Ok(None);
        }
        // Owned by the walk, so dropping this future leaves the flag set
        // until the blocking walk has actually finished.
        let guard = InFlightGuard(Arc::clone(&self.in_flight));

        tracing::info!(roots = roots.len(), "Starting scan");
        let raw = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            scan_roots(&roots)
        })
        .await
            .map_err(|e| Error::internal(format!("Scan task failed: {e}")))?;

        Ok(Some(ScanReport::from_raw(raw, &self.home)))
    }
}
