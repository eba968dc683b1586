//! Bounded recursive walk over scan roots.
//!
//! Outside a `.claude` directory the walk enters directories at most two
//! levels below the root and keeps only the special file names. Once inside
//! `.claude` there is no depth limit and every known extension is kept.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use walkdir::{DirEntry, WalkDir};

use crate::catalog::MARKER_DIR;
use crate::observability::spans;

/// Extensions kept inside the marker directory.
pub const KNOWN_EXTENSIONS: &[&str] = &["md", "json", "yaml", "yml", "txt", "toml", "log", "sh"];

/// File names kept wherever they are found.
pub const SPECIAL_FILES: &[&str] = &["CLAUDE.md", ".clauderc"];

/// Directories never entered.
pub const SKIP_DIRS: &[&str] = &[".git", "node_modules", ".venv", "venv", "__pycache__"];

/// Deepest directory entered outside the marker directory. The root is depth 0.
pub const MAX_DEPTH: usize = 2;

/// A file found by the walker, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path.
    pub path: PathBuf,
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
    /// Whether the file has no write permission.
    pub read_only: bool,
    /// Whether the file lies below a `.claude` directory.
    pub inside_marker: bool,
    /// Path relative to the nearest enclosing `.claude` directory.
    pub marker_relative_path: Option<PathBuf>,
}

/// Combined output of a walk over all roots.
#[derive(Debug, Clone, Default)]
pub struct RawScan {
    /// Discovered files, in walk order.
    pub files: Vec<DiscoveredFile>,
    /// Non-fatal errors, one line each.
    pub errors: Vec<String>,
    /// Wall-clock time of the walk.
    pub duration: Duration,
}

/// Walk every root and collect matching files.
///
/// Roots that do not exist or are not directories are skipped silently.
/// Unreadable directories and metadata are recorded in `errors` and the
/// walk continues elsewhere.
#[must_use]
pub fn scan_roots(roots: &[PathBuf]) -> RawScan {
    let start = Instant::now();
    let mut scan = RawScan::default();

    for root in roots {
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "Skipping missing scan root");
            continue;
        }
        let _span = spans::scan_span(root).entered();
        scan_root(root, &mut scan);
    }

    scan.duration = start.elapsed();
    tracing::info!(
        roots = roots.len(),
        files = scan.files.len(),
        errors = scan.errors.len(),
        elapsed_ms = scan.duration.as_millis(),
        "Scan complete"
    );
    scan
}

fn scan_root(root: &Path, scan: &mut RawScan) {
    let root_is_marker = root.file_name() == Some(OsStr::new(MARKER_DIR));

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| should_descend(root, root_is_marker, entry));

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root);
                let message = format!("Failed to read directory {}: {e}", path.display());
                tracing::warn!("{message}");
                scan.errors.push(message);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let marker_base = marker_base(root, root_is_marker, entry.path());
        let name = entry.file_name().to_string_lossy().into_owned();
        if !should_include(&name, marker_base.is_some()) {
            continue;
        }

        let metadata = match fs::metadata(entry.path()) {
            Ok(metadata) => metadata,
            Err(e) => {
                let message = format!(
                    "Failed to read attributes for {}: {e}",
                    entry.path().display()
                );
                tracing::warn!("{message}");
                scan.errors.push(message);
                continue;
            }
        };

        // A symlink to a directory is not followed and not a file either.
        if metadata.is_dir() {
            continue;
        }

        tracing::debug!(path = %entry.path().display(), "Discovered file");
        scan.files.push(DiscoveredFile {
            path: entry.path().to_path_buf(),
            name,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            read_only: !is_writable(entry.path(), &metadata),
            inside_marker: marker_base.is_some(),
            marker_relative_path: marker_base
                .and_then(|base| entry.path().strip_prefix(base).ok().map(Path::to_path_buf)),
        });
    }
}

/// Decide whether the walker enters a directory. Files always pass.
fn should_descend(root: &Path, root_is_marker: bool, entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    if SKIP_DIRS.contains(&name.as_ref()) {
        return false;
    }
    if name == MARKER_DIR {
        return true;
    }
    if name.starts_with('.') {
        return false;
    }
    if marker_base(root, root_is_marker, entry.path()).is_some() {
        return true;
    }
    entry.depth() <= MAX_DEPTH
}

/// Inclusion rule for a file name.
#[must_use]
pub fn should_include(name: &str, inside_marker: bool) -> bool {
    if SPECIAL_FILES.contains(&name) {
        return true;
    }
    inside_marker
        && Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .is_some_and(|ext| KNOWN_EXTENSIONS.contains(&ext.as_str()))
}

/// The nearest `.claude` directory enclosing `path` (not counting `path`
/// itself), or the root when the root is a `.claude` directory.
/// Whether the current user may write `path`, as the kernel decides.
#[cfg(unix)]
fn is_writable(path: &Path, _metadata: &fs::Metadata) -> bool {
    rustix::fs::access(path, rustix::fs::Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
fn is_writable(_path: &Path, metadata: &fs::Metadata) -> bool {
    !metadata.permissions().readonly()
}

fn marker_base(root: &Path, root_is_marker: bool, path: &Path) -> Option<PathBuf> {
    let mut base = root_is_marker.then(|| root.to_path_buf());
    let parent = path.strip_prefix(root).ok()?.parent()?;

    let mut current = root.to_path_buf();
    for component in parent.components() {
        current.push(component);
        if component.as_os_str() == MARKER_DIR {
            base = Some(current.clone());
        }
    }
    base
}
