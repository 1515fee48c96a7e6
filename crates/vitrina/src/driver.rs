//! Narrow driver capability interface and the CDP backend.
//!
//! Page objects depend only on [`PageDriver`]; any backend implementing it
//! (the CDP driver here, the in-memory model in [`crate::mock`]) can sit
//! behind them without touching page-object logic.

use crate::locator::Selector;
use crate::result::VitrinaResult;
use async_trait::async_trait;
use std::time::Duration;

/// The complete capability set the suite requires from a browser backend.
///
/// One implementor instance wraps exactly one page/tab; the owning test
/// issues all calls sequentially from a single logical flow.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate the page to `url`.
    ///
    /// # Errors
    ///
    /// Returns `Navigation` when the destination is unreachable or the
    /// navigation is aborted.
    async fn navigate(&self, url: &str) -> VitrinaResult<()>;

    /// Block until the element is rendered visible, up to `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` carrying the selector and timeout when the
    /// element never becomes visible within the bound.
    async fn wait_for_visible(&self, selector: &Selector, timeout: Duration) -> VitrinaResult<()>;

    /// Click the first element the selector resolves to.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` when nothing matches.
    async fn click(&self, selector: &Selector) -> VitrinaResult<()>;

    /// Replace the value of the matched input with `text`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` when nothing matches.
    async fn fill(&self, selector: &Selector, text: &str) -> VitrinaResult<()>;

    /// Text content of the first match, or `None` when nothing matches.
    /// Absence is a valid outcome, not an error.
    async fn text_content(&self, selector: &Selector) -> VitrinaResult<Option<String>>;

    /// Text content of every match, in DOM order. Empty when nothing
    /// matches.
    async fn all_text_contents(&self, selector: &Selector) -> VitrinaResult<Vec<String>>;

    /// Number of elements the selector resolves to.
    async fn count(&self, selector: &Selector) -> VitrinaResult<usize>;

    /// Whether the first match is currently rendered visible. Absence reads
    /// as `false`.
    async fn is_visible(&self, selector: &Selector) -> VitrinaResult<bool>;

    /// Select the option with the given value on a `<select>` element.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` when the dropdown is absent.
    async fn select_option(&self, selector: &Selector, value: &str) -> VitrinaResult<()>;

    /// Capture the current visual state as PNG bytes.
    async fn screenshot(&self) -> VitrinaResult<Vec<u8>>;

    /// The page's current URL.
    async fn current_url(&self) -> VitrinaResult<String>;
}

#[cfg(feature = "browser")]
pub use cdp::CdpDriver;

#[cfg(feature = "browser")]
mod cdp {
    use super::{PageDriver, Selector, VitrinaResult};
    use crate::result::VitrinaError;
    use crate::wait::{poll_until, WaitOptions};
    use async_trait::async_trait;
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    /// CDP-backed driver over a single chromiumoxide page.
    ///
    /// All element operations evaluate the JavaScript produced by
    /// [`Selector`]; fills dispatch a native-setter `input` event so
    /// framework-controlled fields observe the change.
    #[derive(Debug, Clone)]
    pub struct CdpDriver {
        page: Arc<Mutex<CdpPage>>,
        poll_interval: Duration,
    }

    impl CdpDriver {
        /// Wrap an existing CDP page handle
        #[must_use]
        pub fn new(page: CdpPage) -> Self {
            Self {
                page: Arc::new(Mutex::new(page)),
                poll_interval: Duration::from_millis(crate::locator::DEFAULT_POLL_INTERVAL_MS),
            }
        }

        /// Set the visibility-poll interval
        #[must_use]
        pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
            self.poll_interval = interval;
            self
        }

        async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> VitrinaResult<T> {
            let page = self.page.lock().await;
            let result = page
                .evaluate(expr)
                .await
                .map_err(|e| VitrinaError::Page {
                    message: e.to_string(),
                })?;
            result.into_value().map_err(|e| VitrinaError::Page {
                message: e.to_string(),
            })
        }
    }

    #[async_trait]
    impl PageDriver for CdpDriver {
        async fn navigate(&self, url: &str) -> VitrinaResult<()> {
            tracing::debug!(url, "navigate");
            let page = self.page.lock().await;
            page.goto(url)
                .await
                .map_err(|e| VitrinaError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        async fn wait_for_visible(
            &self,
            selector: &Selector,
            timeout: Duration,
        ) -> VitrinaResult<()> {
            let query = selector.to_visibility_query();
            let options = WaitOptions::new()
                .with_timeout(timeout.as_millis() as u64)
                .with_poll_interval(self.poll_interval.as_millis() as u64);
            poll_until(options, || {
                let query = query.clone();
                async move { self.eval::<bool>(&query).await }
            })
            .await
            .map_err(|e| match e {
                VitrinaError::Timeout { ms } => {
                    VitrinaError::element_not_found(selector.describe(), ms)
                }
                other => other,
            })
        }

        async fn click(&self, selector: &Selector) -> VitrinaResult<()> {
            tracing::debug!(selector = %selector, "click");
            let expr = format!(
                "(() => {{ const el = {}; if (!el) return false; el.click(); return true; }})()",
                selector.to_query()
            );
            if self.eval::<bool>(&expr).await? {
                Ok(())
            } else {
                Err(VitrinaError::element_not_found(selector.describe(), 0))
            }
        }

        async fn fill(&self, selector: &Selector, text: &str) -> VitrinaResult<()> {
            tracing::debug!(selector = %selector, "fill");
            let expr = format!(
                "(() => {{ const el = {}; if (!el) return false; \
                 const proto = Object.getPrototypeOf(el); \
                 const desc = Object.getOwnPropertyDescriptor(proto, 'value'); \
                 if (desc && desc.set) {{ desc.set.call(el, {text:?}); }} else {{ el.value = {text:?}; }} \
                 el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                 return true; }})()",
                selector.to_query()
            );
            if self.eval::<bool>(&expr).await? {
                Ok(())
            } else {
                Err(VitrinaError::element_not_found(selector.describe(), 0))
            }
        }

        async fn text_content(&self, selector: &Selector) -> VitrinaResult<Option<String>> {
            let expr = format!("({})?.textContent ?? null", selector.to_query());
            self.eval(&expr).await
        }

        async fn all_text_contents(&self, selector: &Selector) -> VitrinaResult<Vec<String>> {
            self.eval(&selector.to_all_texts_query()).await
        }

        async fn count(&self, selector: &Selector) -> VitrinaResult<usize> {
            self.eval(&selector.to_count_query()).await
        }

        async fn is_visible(&self, selector: &Selector) -> VitrinaResult<bool> {
            self.eval(&selector.to_visibility_query()).await
        }

        async fn select_option(&self, selector: &Selector, value: &str) -> VitrinaResult<()> {
            tracing::debug!(selector = %selector, value, "select option");
            let expr = format!(
                "(() => {{ const el = {}; if (!el) return false; \
                 el.value = {value:?}; \
                 el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                 return true; }})()",
                selector.to_query()
            );
            if self.eval::<bool>(&expr).await? {
                Ok(())
            } else {
                Err(VitrinaError::element_not_found(selector.describe(), 0))
            }
        }

        async fn screenshot(&self) -> VitrinaResult<Vec<u8>> {
            let page = self.page.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();
            let shot = page
                .execute(params)
                .await
                .map_err(|e| VitrinaError::Screenshot {
                    message: e.to_string(),
                })?;
            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&shot.data)
                .map_err(|e| VitrinaError::Screenshot {
                    message: e.to_string(),
                })
        }

        async fn current_url(&self) -> VitrinaResult<String> {
            self.eval("window.location.href").await
        }
    }
}
