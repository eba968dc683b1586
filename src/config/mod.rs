//! Configuration management for claudeshelf.
//!
//! Supports configuration from:
//! - Command-line arguments (highest priority)
//! - Environment variables
//! - Built-in defaults (lowest priority)

mod roots;
mod settings;

pub use roots::{ScanRoot, ScanRoots};
pub use settings::{Config, DEFAULT_DEBOUNCE_MS};
