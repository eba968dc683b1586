//! Cleanup analysis over indexed entries.
//!
//! Each entry is checked independently for being empty, holding only a
//! trivial literal, or being stale. One entry can yield several candidates.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::catalog::IndexedEntry;

/// Age beyond which an unmodified file is stale.
pub const STALE_AFTER: Duration = Duration::days(30);

/// Files at or above this size are never read for the content check.
pub const EMPTY_CONTENT_MAX_BYTES: u64 = 1024;

/// Trimmed contents that count as empty.
const EMPTY_LITERALS: &[&str] = &["[]", "{}", "null"];

/// Why an entry was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanupReason {
    /// The file is 0 bytes.
    EmptyFile,
    /// The file holds only whitespace or a trivial literal.
    EmptyContent,
    /// The file was not modified for longer than [`STALE_AFTER`].
    Stale,
}

impl CleanupReason {
    /// Display order used by [`grouped`].
    pub const ORDER: [Self; 3] = [Self::EmptyFile, Self::EmptyContent, Self::Stale];

    /// Suffix of the candidate identifier.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EmptyFile => "empty",
            Self::EmptyContent => "content",
            Self::Stale => "stale",
        }
    }

    /// Section heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::EmptyFile => "Empty files",
            Self::EmptyContent => "Empty content",
            Self::Stale => "Stale files",
        }
    }
}

impl fmt::Display for CleanupReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// An entry flagged for cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupCandidate {
    /// `<entry id>-<reason tag>`.
    pub id: String,
    /// The flagged entry.
    pub entry: IndexedEntry,
    /// Why it was flagged.
    pub reason: CleanupReason,
    /// Human-readable explanation.
    pub detail: String,
}

impl CleanupCandidate {
    fn new(entry: &IndexedEntry, reason: CleanupReason, detail: String) -> Self {
        Self {
            id: format!("{}-{}", entry.id, reason.tag()),
            entry: entry.clone(),
            reason,
            detail,
        }
    }
}

/// Analyze entries against the current time.
#[must_use]
pub fn analyze(entries: &[IndexedEntry]) -> Vec<CleanupCandidate> {
    analyze_at(entries, Utc::now())
}

/// Analyze entries as of `now`.
///
/// Small files are read for the content check; unreadable ones are skipped.
#[must_use]
pub fn analyze_at(entries: &[IndexedEntry], now: DateTime<Utc>) -> Vec<CleanupCandidate> {
    let mut candidates = Vec::new();

    for entry in entries {
        if entry.size == 0 {
            candidates.push(CleanupCandidate::new(
                entry,
                CleanupReason::EmptyFile,
                "File is empty (0 bytes)".to_string(),
            ));
        }

        if entry.size > 0 && entry.size < EMPTY_CONTENT_MAX_BYTES {
            if let Some(detail) = empty_content_detail(entry) {
                candidates.push(CleanupCandidate::new(
                    entry,
                    CleanupReason::EmptyContent,
                    detail,
                ));
            }
        }

        let age = now.signed_duration_since(entry.modified);
        if age > STALE_AFTER {
            candidates.push(CleanupCandidate::new(
                entry,
                CleanupReason::Stale,
                format!("Not modified in {} days", age.num_days()),
            ));
        }
    }

    tracing::info!(
        candidates = candidates.len(),
        entries = entries.len(),
        "Cleanup analysis complete"
    );
    candidates
}

fn empty_content_detail(entry: &IndexedEntry) -> Option<String> {
    let content = match std::fs::read_to_string(&entry.path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %entry.path.display(), error = %e, "Skipping unreadable file");
            return None;
        }
    };

    let trimmed = content.trim();
    if trimmed.is_empty() {
        Some("File contains only whitespace".to_string())
    } else if EMPTY_LITERALS.contains(&trimmed) {
        Some(format!("File contains only \"{trimmed}\""))
    } else {
        None
    }
}

/// Group candidates by reason in display order, omitting empty groups.
#[must_use]
pub fn grouped(candidates: &[CleanupCandidate]) -> Vec<(CleanupReason, Vec<&CleanupCandidate>)> {
    CleanupReason::ORDER
        .into_iter()
        .filter_map(|reason| {
            let matching: Vec<_> = candidates.iter().filter(|c| c.reason == reason).collect();
            (!matching.is_empty()).then_some((reason, matching))
        })
        .collect()
}

/// Distinct entries referenced by candidates, in first-occurrence order.
#[must_use]
pub fn unique_entries(candidates: &[CleanupCandidate]) -> Vec<&IndexedEntry> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for candidate in candidates {
        if seen.insert(candidate.entry.id.as_str()) {
            unique.push(&candidate.entry);
        }
    }
    unique
}
