//! Heuristic detection of files that are probably safe to discard.

mod analyzer;

pub use analyzer::{
    analyze, analyze_at, grouped, unique_entries, CleanupCandidate, CleanupReason,
    EMPTY_CONTENT_MAX_BYTES, STALE_AFTER,
};
