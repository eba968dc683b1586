//! Filesystem discovery.
//!
//! This module provides:
//! - A bounded recursive walker with marker-aware depth and skip rules
//! - A single-flight async scanner that classifies walker output

mod service;
mod walker;

pub use service::Scanner;
pub use walker::{
    scan_roots, should_include, DiscoveredFile, RawScan, KNOWN_EXTENSIONS, MAX_DEPTH, SKIP_DIRS,
    SPECIAL_FILES,
};
