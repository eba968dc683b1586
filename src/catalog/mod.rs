//! Classification and the in-memory index of discovered files.
//!
//! This module provides:
//! - The nine file categories and the ordered rules assigning them
//! - Scope detection and project-name decoding
//! - Path-derived entry identifiers
//! - The index the UI layer reads from

mod category;
mod entry;
mod index;
mod path_decoder;

pub use category::{assign_category, Category, FileFacts};
pub use entry::{entry_id, IndexedEntry};
pub use index::{Index, ScanReport};
pub use path_decoder::{decode_project_name, detect_scope, display_name, Scope};

/// Name of the configuration marker directory.
pub const MARKER_DIR: &str = ".claude";
