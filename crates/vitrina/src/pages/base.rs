//! Generic page operations shared by every page object.
//!
//! The absence contract is deliberately non-uniform and must stay that way:
//! `click_element`/`fill_input` treat a missing element as a hard
//! `ElementNotFound`, while `get_text` returns an empty string and
//! `is_element_visible` answers `false` after its short probe. The probe is
//! the one designated way to assert that something is *not* on the page.

use crate::data::timeouts;
use crate::driver::PageDriver;
use crate::locator::{Locator, Selector};
use crate::result::{VitrinaError, VitrinaResult};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Directory screenshots are written under
pub const SCREENSHOT_DIR: &str = "test-results/screenshots";

/// Shared page-level operations, parameterized by a driver handle.
#[derive(Clone)]
pub struct BasePage {
    driver: Arc<dyn PageDriver>,
    base_url: String,
    default_timeout: Duration,
    probe_timeout: Duration,
    screenshot_dir: PathBuf,
}

impl std::fmt::Debug for BasePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasePage")
            .field("base_url", &self.base_url)
            .field("default_timeout", &self.default_timeout)
            .field("probe_timeout", &self.probe_timeout)
            .finish()
    }
}

impl BasePage {
    /// Create a base page over a driver handle and application origin
    #[must_use]
    pub fn new(driver: Arc<dyn PageDriver>, base_url: impl Into<String>) -> Self {
        Self {
            driver,
            base_url: base_url.into(),
            default_timeout: Duration::from_millis(timeouts::DEFAULT),
            probe_timeout: Duration::from_millis(timeouts::SHORT),
            screenshot_dir: PathBuf::from(SCREENSHOT_DIR),
        }
    }

    /// Override the locate-then-act timeout
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Override the screenshot directory
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// The configured application origin
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The shared driver handle
    #[must_use]
    pub fn driver(&self) -> Arc<dyn PageDriver> {
        self.driver.clone()
    }

    /// Navigate to an absolute URL.
    pub async fn navigate_to(&self, url: &str) -> VitrinaResult<()> {
        tracing::info!(url, "navigating");
        self.driver.navigate(url).await
    }

    /// Wait until `selector` is visible, up to `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` carrying the selector and timeout.
    pub async fn wait_for_element(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> VitrinaResult<()> {
        self.driver.wait_for_visible(selector, timeout).await
    }

    /// Wait for a locator using its own timeout budget.
    pub async fn wait_for(&self, locator: &Locator) -> VitrinaResult<()> {
        self.driver
            .wait_for_visible(locator.selector(), locator.options().timeout)
            .await
    }

    /// Locate then click; absence within the default timeout is a hard
    /// failure.
    pub async fn click_element(&self, selector: &Selector) -> VitrinaResult<()> {
        self.driver
            .wait_for_visible(selector, self.default_timeout)
            .await?;
        self.driver.click(selector).await
    }

    /// Locate then fill; absence within the default timeout is a hard
    /// failure.
    pub async fn fill_input(&self, selector: &Selector, text: &str) -> VitrinaResult<()> {
        self.driver
            .wait_for_visible(selector, self.default_timeout)
            .await?;
        self.driver.fill(selector, text).await
    }

    /// Text content of the element, or an empty string when it is absent.
    /// Callers treat "no text" as a valid observation, not a failure.
    pub async fn get_text(&self, selector: &Selector) -> VitrinaResult<String> {
        Ok(self
            .driver
            .text_content(selector)
            .await?
            .unwrap_or_default())
    }

    /// Probe visibility with the short fixed timeout; answers `false` on
    /// timeout instead of erring. Driver faults still propagate.
    pub async fn is_element_visible(&self, selector: &Selector) -> VitrinaResult<bool> {
        match self
            .driver
            .wait_for_visible(selector, self.probe_timeout)
            .await
        {
            Ok(()) => Ok(true),
            Err(e) if e.is_absence() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Capture the current visual state under `test-results/screenshots/`.
    /// Diagnostics only; never asserted on.
    pub async fn take_screenshot(&self, name: &str) -> VitrinaResult<PathBuf> {
        let bytes = self.driver.screenshot().await?;
        tokio::fs::create_dir_all(&self.screenshot_dir).await?;
        let path = self
            .screenshot_dir
            .join(format!("{}.png", sanitize_name(name)));
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), "screenshot captured");
        Ok(path)
    }

    /// The page's current URL.
    pub async fn current_url(&self) -> VitrinaResult<String> {
        self.driver.current_url().await
    }

    /// Assert that the current URL contains `fragment`.
    ///
    /// # Errors
    ///
    /// Returns `Assertion` naming both values when it does not.
    pub async fn expect_url_contains(&self, fragment: &str) -> VitrinaResult<()> {
        let url = self.current_url().await?;
        if url.contains(fragment) {
            Ok(())
        } else {
            Err(VitrinaError::Assertion {
                message: format!("Expected URL containing {fragment:?}, got {url:?}"),
            })
        }
    }
}

/// Replace filesystem-hostile characters so any test name maps to a valid
/// artifact path.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | ' ' => '_',
            other => other,
        })
        .collect()
}

/// Join a path onto an origin without doubling slashes
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStorefront;

    fn page() -> BasePage {
        BasePage::new(
            Arc::new(MockStorefront::new()),
            crate::config::DEFAULT_BASE_URL,
        )
    }

    mod absence_contract_tests {
        use super::*;

        #[tokio::test]
        async fn test_get_text_absent_is_empty_string() {
            let page = page();
            let text = page
                .get_text(&Selector::css("[data-test='error']"))
                .await
                .unwrap();
            assert_eq!(text, "");
        }

        #[tokio::test]
        async fn test_is_visible_absent_is_false() {
            let page = page();
            let visible = page
                .is_element_visible(&Selector::css(".shopping_cart_badge"))
                .await
                .unwrap();
            assert!(!visible);
        }

        #[tokio::test]
        async fn test_click_absent_is_hard_failure() {
            let page = page();
            let result = page
                .click_element(&Selector::css(".shopping_cart_badge"))
                .await;
            assert!(matches!(
                result,
                Err(VitrinaError::ElementNotFound { .. })
            ));
        }

        #[tokio::test]
        async fn test_fill_absent_is_hard_failure() {
            let page = page();
            // No such input exists on the login page.
            let result = page
                .fill_input(&Selector::css("[data-test='coupon']"), "SAVE10")
                .await;
            assert!(matches!(
                result,
                Err(VitrinaError::ElementNotFound { .. })
            ));
        }

        #[tokio::test]
        async fn test_element_not_found_carries_selector_and_timeout() {
            let page = page();
            let err = page
                .click_element(&Selector::css(".missing_thing"))
                .await
                .unwrap_err();
            match err {
                VitrinaError::ElementNotFound {
                    selector,
                    timeout_ms,
                } => {
                    assert!(selector.contains(".missing_thing"));
                    assert_eq!(timeout_ms, timeouts::DEFAULT);
                }
                other => panic!("expected ElementNotFound, got {other}"),
            }
        }
    }

    mod helper_tests {
        use super::*;

        #[test]
        fn test_sanitize_name() {
            assert_eq!(sanitize_name("add to cart / retry?"), "add_to_cart___retry_");
            assert_eq!(sanitize_name("plain"), "plain");
        }

        #[test]
        fn test_join_url() {
            assert_eq!(
                join_url("https://shop.example/", "/inventory.html"),
                "https://shop.example/inventory.html"
            );
            assert_eq!(
                join_url("https://shop.example", "/"),
                "https://shop.example/"
            );
        }
    }

    mod screenshot_tests {
        use super::*;

        #[tokio::test]
        async fn test_screenshot_written_to_named_path() {
            let dir = tempfile::tempdir().unwrap();
            let page = page().with_screenshot_dir(dir.path());
            let path = page.take_screenshot("login failure: bad creds").await.unwrap();
            assert!(path.ends_with("login_failure__bad_creds.png"));
            assert!(path.exists());
        }
    }

    mod url_tests {
        use super::*;

        #[tokio::test]
        async fn test_expect_url_contains() {
            let page = page();
            assert!(page.expect_url_contains("saucedemo").await.is_ok());
            let err = page.expect_url_contains("inventory").await.unwrap_err();
            assert!(matches!(err, VitrinaError::Assertion { .. }));
        }
    }
}
