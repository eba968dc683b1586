//! Error types and Result aliases for claudeshelf.
//!
//! This module defines the error hierarchy used throughout the crate.
//! All public functions return `Result<T, Error>` or `Result<T>`.
//!
//! Non-fatal scan problems (an unreadable directory, missing metadata) are
//! not errors here: the scanner collects them as strings and keeps going.

use thiserror::Error;

/// Result type alias using claudeshelf's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for claudeshelf operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// File watching error.
    #[error("watcher error: {0}")]
    Watcher(#[from] WatcherError),

    /// File operation error.
    #[error("file operation error: {0}")]
    FileOp(#[from] FileOpError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// File watcher errors.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// The OS notification backend could not be created.
    #[error("failed to initialize watcher: {0}")]
    Init(String),

    /// Failed to watch path.
    #[error("failed to watch path '{path}': {reason}")]
    WatchFailed { path: String, reason: String },
}

/// Errors from mutating file operations.
///
/// Every variant names the action that was attempted so callers can report
/// it without inspecting the underlying I/O error.
#[derive(Error, Debug)]
pub enum FileOpError {
    /// Saving new content over an existing file failed.
    #[error("failed to save '{path}': {source}")]
    Save {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Creating a new file failed.
    #[error("failed to create '{path}': {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Moving a file to the trash failed.
    #[error("failed to move '{path}' to trash: {reason}")]
    Trash { path: String, reason: String },

    /// Permanently deleting a file failed.
    #[error("failed to delete '{path}': {source}")]
    Delete {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Some files in a bulk operation failed while others succeeded.
    #[error("{succeeded} file(s) processed, {failed} file(s) failed")]
    PartialFailure {
        succeeded: usize,
        failed: usize,
        errors: Vec<String>,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl FileOpError {
    /// Per-file messages of a partial failure; empty for single-file errors.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        match self {
            Self::PartialFailure { errors, .. } => errors,
            _ => &[],
        }
    }
}
