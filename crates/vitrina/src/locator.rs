//! Locator abstraction for element selection.
//!
//! A [`Selector`] names an element semantically; its methods generate the
//! JavaScript the CDP driver evaluates to resolve, count, read, or probe the
//! element. Page objects hold a fixed registry of selectors and never build
//! them from runtime input, with one exception: `CssWithText` narrows a row
//! set to the unique row whose text contains a given product name.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for locate-then-act operations (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Timeout for the safe visibility probe (3 seconds)
pub const PROBE_TIMEOUT_MS: u64 = 3000;

/// Default polling interval for waits (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Selector for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g. ".inventory_item_name")
    Css(String),
    /// First element matching `css` whose text content contains `text`
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
    /// Element matching `inner` inside the element resolved by `scope`
    Within {
        /// Scope selector resolved first
        scope: Box<Selector>,
        /// CSS selector applied within the scope element
        inner: Box<Selector>,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a CSS selector filtered by contained text
    #[must_use]
    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// Scope another selector inside this one
    #[must_use]
    pub fn within(self, inner: Self) -> Self {
        Self::Within {
            scope: Box::new(self),
            inner: Box::new(inner),
        }
    }

    /// Human-readable description for error payloads
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Css(s) => s.clone(),
            Self::CssWithText { css, text } => format!("{css} :has-text({text:?})"),
            Self::Within { scope, inner } => {
                format!("{} >> {}", scope.describe(), inner.describe())
            }
        }
    }

    /// JavaScript expression resolving the first matching element (or null)
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::CssWithText { css, text } => format!(
                "Array.from(document.querySelectorAll({css:?})).find(el => el.textContent.includes({text:?})) ?? null"
            ),
            Self::Within { scope, inner } => {
                let inner_css = inner.inner_css();
                format!("({})?.querySelector({inner_css:?}) ?? null", scope.to_query())
            }
        }
    }

    /// JavaScript expression counting matching elements
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::CssWithText { css, text } => format!(
                "Array.from(document.querySelectorAll({css:?})).filter(el => el.textContent.includes({text:?})).length"
            ),
            Self::Within { scope, inner } => {
                let inner_css = inner.inner_css();
                format!(
                    "(({})?.querySelectorAll({inner_css:?}) ?? []).length",
                    scope.to_query()
                )
            }
        }
    }

    /// JavaScript expression returning the text of every match, in DOM order
    #[must_use]
    pub fn to_all_texts_query(&self) -> String {
        match self {
            Self::Css(s) => format!(
                "Array.from(document.querySelectorAll({s:?})).map(el => el.textContent ?? '')"
            ),
            Self::CssWithText { css, text } => format!(
                "Array.from(document.querySelectorAll({css:?})).filter(el => el.textContent.includes({text:?})).map(el => el.textContent ?? '')"
            ),
            Self::Within { scope, inner } => {
                let inner_css = inner.inner_css();
                format!(
                    "Array.from(({})?.querySelectorAll({inner_css:?}) ?? []).map(el => el.textContent ?? '')",
                    scope.to_query()
                )
            }
        }
    }

    /// JavaScript expression returning true iff the element is rendered
    /// visible (non-zero box, not `display:none`/`visibility:hidden`)
    #[must_use]
    pub fn to_visibility_query(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) return false; \
             const r = el.getBoundingClientRect(); \
             const s = window.getComputedStyle(el); \
             return r.width > 0 && r.height > 0 && s.visibility !== 'hidden' && s.display !== 'none'; }})()",
            self.to_query()
        )
    }

    /// Raw CSS usable as a `querySelector` argument inside a scope.
    ///
    /// `Within` scopes only nest plain CSS on the inner side; the registry
    /// never builds text-filtered inner selectors.
    fn inner_css(&self) -> &str {
        match self {
            Self::Css(s) => s,
            Self::CssWithText { css, .. } => css,
            Self::Within { inner, .. } => inner.inner_css(),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Options for locator behavior
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Timeout for locate-then-act waits
    pub timeout: Duration,
    /// Polling interval while waiting
    pub poll_interval: Duration,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// A selector coupled with wait options
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator from a CSS selector with default options
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::Css(selector.into()),
            options: LocatorOptions::default(),
        }
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}
