//! The in-memory index rebuilt on every scan.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::category::Category;
use super::entry::IndexedEntry;
use crate::scanner::RawScan;

/// Result of one complete scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Classified entries, unique by identifier.
    pub entries: Vec<IndexedEntry>,
    /// Non-fatal errors collected during the walk.
    pub errors: Vec<String>,
    /// Wall-clock time spent walking.
    pub duration: Duration,
    /// When the scan completed.
    pub scanned_at: DateTime<Utc>,
}

impl ScanReport {
    /// Classify raw scan output. Files reached through overlapping roots
    /// keep their first occurrence.
    #[must_use]
    pub fn from_raw(raw: RawScan, home: &Path) -> Self {
        let mut seen = HashSet::new();
        let entries = raw
            .files
            .iter()
            .map(|file| IndexedEntry::from_discovered(file, home))
            .filter(|entry| seen.insert(entry.id.clone()))
            .collect();

        Self {
            entries,
            errors: raw.errors,
            duration: raw.duration,
            scanned_at: Utc::now(),
        }
    }
}

/// Current set of indexed entries.
#[derive(Debug, Clone, Default)]
pub struct Index {
    entries: Vec<IndexedEntry>,
    last_scan: Option<DateTime<Utc>>,
}

impl Index {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a fresh scan.
    pub fn replace(&mut self, report: &ScanReport) {
        self.entries.clone_from(&report.entries);
        self.last_scan = Some(report.scanned_at);
        tracing::debug!(entries = self.entries.len(), "Index replaced");
    }

    /// All entries in scan order.
    #[must_use]
    pub fn entries(&self) -> &[IndexedEntry] {
        &self.entries
    }

    /// When the index was last rebuilt.
    #[must_use]
    pub const fn last_scan(&self) -> Option<DateTime<Utc>> {
        self.last_scan
    }

    /// Look up an entry by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&IndexedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries in `category` (all when `None`) whose fields contain `query`.
    /// An empty query matches everything.
    #[must_use]
    pub fn filtered(&self, category: Option<Category>, query: &str) -> Vec<&IndexedEntry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .filter(|e| query.is_empty() || e.matches(&query))
            .collect()
    }

    /// Number of entries per category. Empty categories are absent.
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.category).or_insert(0) += 1;
        }
        counts
    }

    /// Total bytes per category. Empty categories are absent.
    #[must_use]
    pub fn category_sizes(&self) -> BTreeMap<Category, u64> {
        let mut sizes = BTreeMap::new();
        for entry in &self.entries {
            *sizes.entry(entry.category).or_insert(0) += entry.size;
        }
        sizes
    }

    /// Drop entries for paths that were deleted or trashed.
    /// Returns how many entries were removed.
    pub fn remove_paths(&mut self, paths: &[PathBuf]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !paths.contains(&e.path));
        before - self.entries.len()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
