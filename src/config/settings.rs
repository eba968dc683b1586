//! Configuration settings and validation.

use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

use super::roots::ScanRoots;

/// Default quiet interval before a burst of filesystem events triggers a rescan.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Main configuration for claudeshelf.
#[derive(Debug, Clone)]
pub struct Config {
    /// Home directory used for built-in roots and scope detection.
    pub home_dir: PathBuf,

    /// Additional user-added scan roots.
    pub roots: Vec<PathBuf>,

    /// Whether the built-in roots are scanned.
    pub include_defaults: bool,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines.
    pub log_json: bool,

    /// Watcher quiet interval in milliseconds.
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from("/")),
            roots: Vec::new(),
            include_defaults: true,
            log_level: "info".to_string(),
            log_json: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Config {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        if self.debounce_ms == 0 {
            return Err(Error::config("debounce_ms cannot be 0"));
        }

        if self.debounce_ms > 60_000 {
            return Err(Error::config("debounce_ms cannot exceed 60000"));
        }

        if self.home_dir.as_os_str().is_empty() {
            return Err(Error::config("home directory cannot be empty"));
        }

        Ok(())
    }

    /// Watcher quiet interval.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Build the scan root set: built-in roots first, then user roots.
    #[must_use]
    pub fn scan_roots(&self) -> ScanRoots {
        let mut roots = if self.include_defaults {
            ScanRoots::with_defaults(&self.home_dir)
        } else {
            ScanRoots::default()
        };
        for root in &self.roots {
            roots.add(root.clone());
        }
        roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert!(config.include_defaults);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = Config {
            log_level: "invalid".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log level"));
    }

    #[test]
    fn test_log_level_case_insensitive() {
        for level in ["TRACE", "Debug", "INFO", "Warn", "ERROR"] {
            let config = Config {
                log_level: level.to_string(),
                ..Default::default()
            };
            assert!(
                config.validate().is_ok(),
                "Level '{level}' should be valid (case insensitive)"
            );
        }
    }

    #[test]
    fn test_validate_debounce_bounds() {
        let zero = Config {
            debounce_ms: 0,
            ..Default::default()
        };
        assert!(zero.validate().unwrap_err().to_string().contains("debounce_ms"));

        let huge = Config {
            debounce_ms: 120_000,
            ..Default::default()
        };
        assert!(huge.validate().unwrap_err().to_string().contains("60000"));
    }

    #[test]
    fn test_validate_empty_home() {
        let config = Config {
            home_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("home"));
    }

    #[test]
    fn test_debounce_duration() {
        let config = Config {
            debounce_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_scan_roots_defaults_then_user() {
        let config = Config {
            home_dir: PathBuf::from("/home/alice"),
            roots: vec![PathBuf::from("/opt/work"), PathBuf::from("/home/alice/src")],
            ..Default::default()
        };
        let roots = config.scan_roots();
        // /home/alice/src is already a built-in root
        assert_eq!(roots.len(), 9);
        assert_eq!(roots.iter().last().unwrap().path, PathBuf::from("/opt/work"));
        assert!(!roots.iter().last().unwrap().built_in);
    }

    #[test]
    fn test_scan_roots_without_defaults() {
        let config = Config {
            roots: vec![PathBuf::from("/opt/work")],
            include_defaults: false,
            ..Default::default()
        };
        assert_eq!(config.scan_roots().enabled_paths(), vec![PathBuf::from("/opt/work")]);
    }
}
