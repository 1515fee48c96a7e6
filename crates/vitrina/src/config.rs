//! Environment configuration for a test run.
//!
//! Read once at process start and never mutated afterwards; every session
//! launched during the run shares the same `Environment`.

use serde::{Deserialize, Serialize};

/// Default application origin under test
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com";

/// Default driver-level timeout (30 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Browser engine selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrowserKind {
    /// Chromium via CDP (the only engine the bundled driver supports)
    #[default]
    Chromium,
    /// Firefox (requires an external WebDriver bridge)
    Firefox,
    /// WebKit (requires an external WebDriver bridge)
    Webkit,
}

impl BrowserKind {
    /// Parse a browser name, defaulting to chromium for unknown values.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "firefox" => Self::Firefox,
            "webkit" => Self::Webkit,
            _ => Self::Chromium,
        }
    }

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chromium => "chromium",
            Self::Firefox => "firefox",
            Self::Webkit => "webkit",
        }
    }
}

/// Process-wide test-run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// Base URL of the application under test
    pub base_url: String,
    /// Browser engine to drive
    pub browser: BrowserKind,
    /// Run the browser headless
    pub headless: bool,
    /// Driver-level default timeout in milliseconds
    pub default_timeout_ms: u64,
    /// Path to a chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            browser: BrowserKind::Chromium,
            headless: true,
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            chromium_path: None,
        }
    }
}

impl Environment {
    /// Build the configuration from process environment variables.
    ///
    /// Recognized variables: `BASE_URL`, `BROWSER`, `HEADLESS`, `TIMEOUT`,
    /// `CHROMIUM_PATH`. Unset or unparsable values fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("BASE_URL").unwrap_or(defaults.base_url),
            browser: std::env::var("BROWSER")
                .map(|v| BrowserKind::parse(&v))
                .unwrap_or_default(),
            headless: std::env::var("HEADLESS")
                .map(|v| v.to_ascii_lowercase() != "false")
                .unwrap_or(true),
            default_timeout_ms: std::env::var("TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_timeout_ms),
            chromium_path: std::env::var("CHROMIUM_PATH").ok(),
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the default timeout
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout_ms: u64) -> Self {
        self.default_timeout_ms = timeout_ms;
        self
    }

    /// Set the browser engine
    #[must_use]
    pub const fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    /// Login entry URL (the application serves the form at the origin root)
    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    /// Inventory page URL
    #[must_use]
    pub fn inventory_url(&self) -> String {
        format!("{}/inventory.html", self.base_url.trim_end_matches('/'))
    }
}
