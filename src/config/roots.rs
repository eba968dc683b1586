//! Scan roots: the directories a scan starts from.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Home-relative directories scanned out of the box, in scan order.
/// The empty entry stands for the home directory itself.
const DEFAULT_ROOTS: &[&str] = &[
    ".claude",
    "projects",
    "src",
    "dev",
    "code",
    "workspace",
    "repos",
    "",
];

/// A directory to scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRoot {
    /// Absolute path of the directory.
    pub path: PathBuf,
    /// Whether this root takes part in scans.
    pub enabled: bool,
    /// Built-in roots can be disabled but never removed.
    pub built_in: bool,
}

impl ScanRoot {
    /// Create an enabled user-added root.
    pub fn user(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            enabled: true,
            built_in: false,
        }
    }

    /// Short label: `~` for home, `~/rest` under home, the last component otherwise.
    #[must_use]
    pub fn display_name(&self, home: &Path) -> String {
        if self.path == home {
            return "~".to_string();
        }
        if let Ok(rest) = self.path.strip_prefix(home) {
            return format!("~/{}", rest.display());
        }
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

/// Ordered set of scan roots, unique by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRoots {
    roots: Vec<ScanRoot>,
}

impl ScanRoots {
    /// The built-in roots under `home`, all enabled.
    #[must_use]
    pub fn with_defaults(home: &Path) -> Self {
        let roots = DEFAULT_ROOTS
            .iter()
            .map(|rel| ScanRoot {
                path: if rel.is_empty() {
                    home.to_path_buf()
                } else {
                    home.join(rel)
                },
                enabled: true,
                built_in: true,
            })
            .collect();
        Self { roots }
    }

    /// Append a user root. Returns `false` if the path is already present.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            tracing::debug!(path = %path.display(), "Scan root already present");
            return false;
        }
        self.roots.push(ScanRoot::user(path));
        true
    }

    /// Remove a user root. Built-in roots are left untouched.
    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.roots.len();
        self.roots.retain(|r| r.built_in || r.path != path);
        before != self.roots.len()
    }

    /// Enable or disable a root. Returns `false` if the path is unknown.
    pub fn set_enabled(&mut self, path: &Path, enabled: bool) -> bool {
        match self.roots.iter_mut().find(|r| r.path == path) {
            Some(root) => {
                root.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Flip the enabled flag of a root.
    pub fn toggle(&mut self, path: &Path) -> bool {
        match self.roots.iter_mut().find(|r| r.path == path) {
            Some(root) => {
                root.enabled = !root.enabled;
                true
            }
            None => false,
        }
    }

    /// Check whether a root with this path exists.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.roots.iter().any(|r| r.path == path)
    }

    /// Paths of enabled roots, in order.
    #[must_use]
    pub fn enabled_paths(&self) -> Vec<PathBuf> {
        self.roots
            .iter()
            .filter(|r| r.enabled)
            .map(|r| r.path.clone())
            .collect()
    }

    /// Iterate over all roots.
    pub fn iter(&self) -> impl Iterator<Item = &ScanRoot> {
        self.roots.iter()
    }

    /// Number of roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Check if there are no roots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
