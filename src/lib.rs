//! claudeshelf
//!
//! Finds Claude configuration files (instructions, settings, commands,
//! skills, hooks, memory) across a user's machine, classifies them, flags
//! cleanup candidates, watches for changes and edits them safely.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod fileops;
pub mod observability;
pub mod scanner;
pub mod watcher;

pub use config::Config;
pub use error::{Error, Result};
