//! Structured logging and tracing configuration.
//!
//! Provides setup for observability using the `tracing` crate with:
//! - Structured logging with JSON output option
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Spans for scans and file operations

use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

use crate::{Error, Result};

/// Tracing configuration options.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON output format
    pub json: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Initialize tracing with the given level and output format.
///
/// `RUST_LOG` takes precedence over `level` when set.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing(level: &str, json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so that `--json` output on stdout stays parseable.
    let result = if json {
        let json_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true);

        Registry::default().with(env_filter).with(json_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(true);

        Registry::default().with(env_filter).with(fmt_layer).try_init()
    };
    result.map_err(|e| Error::internal(format!("failed to install tracing subscriber: {e}")))?;

    tracing::debug!("Tracing initialized: level={}, json={}", level, json);
    Ok(())
}

/// Get current tracing configuration from environment variables.
///
/// Respects these environment variables:
/// - `CLAUDESHELF_LOG_LEVEL` - Log level (default: "info")
/// - `CLAUDESHELF_LOG_JSON` - Enable JSON output (default: false)
#[must_use]
pub fn config_from_env() -> TracingConfig {
    let level = std::env::var("CLAUDESHELF_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let json = std::env::var("CLAUDESHELF_LOG_JSON")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false);

    TracingConfig { level, json }
}

/// Span helpers shared by the scanner and file operations.
pub mod spans {
    use std::path::Path;
    use tracing::{info_span, Span};

    /// Span covering the walk of a single scan root.
    #[must_use]
    pub fn scan_span(root: &Path) -> Span {
        info_span!("scan_root", root = %root.display())
    }

    /// Span covering one mutating file operation.
    #[must_use]
    pub fn file_op_span(action: &'static str, path: &Path) -> Span {
        info_span!("file_op", action, path = %path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_tracing_config_default() {
        let config = TracingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json);
    }

    #[test]
    fn test_second_init_is_an_error() {
        // Whichever call comes first in this process wins; the other must fail cleanly.
        let first = init_tracing("debug", false);
        let second = init_tracing("debug", true);
        assert!(first.is_err() || second.is_err());
    }

    #[test]
    fn test_spans_can_be_entered() {
        let span = spans::scan_span(Path::new("/home/alice"));
        let _guard = span.enter();

        let span = spans::file_op_span("save", Path::new("/tmp/settings.json"));
        let _guard = span.enter();
    }
}
