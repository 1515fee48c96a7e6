//! Browser and session lifecycle.
//!
//! One [`Session`] wraps one page/tab and is exclusively owned by the test
//! that created it; it is released unconditionally at test end regardless of
//! outcome. Only compiled with the `browser` feature; without it the suite
//! runs against [`crate::mock::MockStorefront`].

#![cfg(feature = "browser")]

use crate::config::Environment;
use crate::driver::CdpDriver;
use crate::result::{VitrinaError, VitrinaResult};
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Browser launch configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Derive launch options from the process environment configuration
    #[must_use]
    pub fn from_environment(env: &Environment) -> Self {
        Self {
            headless: env.headless,
            chromium_path: env.chromium_path.clone(),
            ..Self::default()
        }
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// A launched browser process able to open isolated sessions
#[derive(Debug)]
pub struct Browser {
    config: BrowserConfig,
    inner: Arc<Mutex<CdpBrowser>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a browser instance.
    ///
    /// # Errors
    ///
    /// Returns `BrowserLaunch` if the process cannot be started.
    pub async fn launch(config: BrowserConfig) -> VitrinaResult<Self> {
        let mut builder = CdpConfig::builder();

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        builder = builder.window_size(config.viewport_width, config.viewport_height);

        let cdp_config = builder.build().map_err(|e| VitrinaError::BrowserLaunch {
            message: e.to_string(),
        })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| VitrinaError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        tracing::info!(headless = config.headless, "browser launched");

        Ok(Self {
            config,
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a new session (one page/tab) for exclusive use by one test.
    ///
    /// # Errors
    ///
    /// Returns `Page` if the tab cannot be created.
    pub async fn new_session(&self) -> VitrinaResult<Session> {
        let browser = self.inner.lock().await;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| VitrinaError::Page {
                message: e.to_string(),
            })?;

        Ok(Session {
            driver: CdpDriver::new(page),
        })
    }

    /// Get the launch configuration
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Close the browser and every session it owns.
    pub async fn close(self) -> VitrinaResult<()> {
        let mut browser = self.inner.lock().await;
        browser
            .close()
            .await
            .map_err(|e| VitrinaError::BrowserLaunch {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// One browser tab, exclusively owned by the test that created it
#[derive(Debug, Clone)]
pub struct Session {
    driver: CdpDriver,
}

impl Session {
    /// The driver handle page objects are built over
    #[must_use]
    pub fn driver(&self) -> CdpDriver {
        self.driver.clone()
    }
}
