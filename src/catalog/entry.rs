//! Indexed entries: discovered files with their classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use super::category::{assign_category, Category};
use super::path_decoder::{detect_scope, display_name, Scope};
use crate::scanner::DiscoveredFile;

/// Stable identifier for a path: first 8 bytes of SHA-256 over its UTF-8
/// bytes, as 16 lower-case hex characters.
#[must_use]
pub fn entry_id(path: &str) -> String {
    let digest = Sha256::digest(path.as_bytes());
    hex::encode(&digest[..8])
}

/// A classified file held by the in-memory index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedEntry {
    /// Path-derived identifier, see [`entry_id`].
    pub id: String,

    /// File name (e.g. `CLAUDE.md`).
    pub name: String,

    /// Absolute path.
    pub path: PathBuf,

    /// Name shown to users, prefixed with the project when known.
    pub display_name: String,

    /// Assigned category.
    pub category: Category,

    /// Global or project scope.
    pub scope: Scope,

    /// Decoded project name.
    pub project: Option<String>,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time.
    pub modified: DateTime<Utc>,

    /// Whether the current user cannot write the file.
    pub read_only: bool,
}

impl IndexedEntry {
    /// Classify a discovered file.
    #[must_use]
    pub fn from_discovered(file: &DiscoveredFile, home: &Path) -> Self {
        let path_str = file.path.to_string_lossy();
        let home_str = home.to_string_lossy();

        let category = assign_category(&file.name, &path_str, file.inside_marker);
        let (scope, project) = detect_scope(&path_str, &home_str);

        Self {
            id: entry_id(&path_str),
            display_name: display_name(&file.name, project.as_deref()),
            name: file.name.clone(),
            path: file.path.clone(),
            category,
            scope,
            project,
            size: file.size,
            modified: DateTime::<Utc>::from(file.modified),
            read_only: file.read_only,
        }
    }

    /// Case-insensitive match of `query` (already lower-cased) against
    /// name, display name, path and project.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self.display_name.to_lowercase().contains(query)
            || self.path.to_string_lossy().to_lowercase().contains(query)
            || self
                .project
                .as_ref()
                .is_some_and(|p| p.to_lowercase().contains(query))
    }
}
