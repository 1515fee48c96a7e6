//! Logging setup for a test run.
//!
//! The subscriber is constructed explicitly by the test entry point and its
//! lifecycle is owned by the returned [`LogHandle`]; there is no
//! module-level singleton. Page objects and drivers emit `tracing` events
//! against whatever subscriber the owning process installed.

use crate::result::VitrinaResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Configuration for test-run logging
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info")
    pub default_filter: String,
    /// Directory for log artifacts; `None` logs to stderr only
    pub log_dir: Option<PathBuf>,
    /// Include span targets in output
    pub with_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            log_dir: None,
            with_targets: false,
        }
    }
}

impl LogConfig {
    /// Create a config with the given default filter directive
    #[must_use]
    pub fn new(default_filter: impl Into<String>) -> Self {
        Self {
            default_filter: default_filter.into(),
            ..Self::default()
        }
    }

    /// Write log artifacts under `dir` in addition to stderr
    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Include event targets in output
    #[must_use]
    pub const fn with_targets(mut self, enabled: bool) -> Self {
        self.with_targets = enabled;
        self
    }
}

/// Owns the installed tracing subscriber for the lifetime of the run.
#[derive(Debug)]
pub struct LogHandle {
    installed: bool,
}

impl LogHandle {
    /// Install a global subscriber per `config`.
    ///
    /// Safe to call more than once within a process (subsequent calls leave
    /// the first subscriber in place); `installed()` reports whether this
    /// handle's call won the race.
    pub fn init(config: &LogConfig) -> VitrinaResult<Self> {
        if let Some(dir) = &config.log_dir {
            std::fs::create_dir_all(dir)?;
        }

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.default_filter.clone()));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_targets)
            .try_init()
            .is_ok();

        Ok(Self { installed })
    }

    /// Whether this handle installed the process-wide subscriber
    #[must_use]
    pub const fn installed(&self) -> bool {
        self.installed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.default_filter, "info");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = LogConfig::new("debug")
            .with_log_dir("test-results/logs")
            .with_targets(true);
        assert_eq!(config.default_filter, "debug");
        assert_eq!(
            config.log_dir.as_deref(),
            Some(std::path::Path::new("test-results/logs"))
        );
        assert!(config.with_targets);
    }

    #[test]
    fn test_init_is_reentrant() {
        let config = LogConfig::default();
        let first = LogHandle::init(&config).expect("init");
        let second = LogHandle::init(&config).expect("init");
        // At most one handle owns the global subscriber; neither call errors.
        if first.installed() {
            assert!(!second.installed());
        }
    }
}
