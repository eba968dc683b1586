//! File system watching.
//!
//! This module provides:
//! - Recursive directory watching using notify-rs
//! - Trailing-edge debouncing of change bursts into one async callback

mod debounce;
#[allow(clippy::module_inception)]
mod watcher;

pub use debounce::{debounce_loop, ChangeCallback};
pub use watcher::{FileWatcher, DEBOUNCE_DURATION};
