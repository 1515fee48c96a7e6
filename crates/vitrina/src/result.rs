//! Result and error types for Vitrina.

use thiserror::Error;

/// Result type for Vitrina operations
pub type VitrinaResult<T> = Result<T, VitrinaError>;

/// Errors that can occur while driving the application under test.
///
/// Driver-level faults (`Navigation`, `ElementNotFound`) propagate uncaught
/// through the page objects into the owning test and terminate that test
/// only. Probe-style reads (`get_text`, visibility checks, the cart badge)
/// encode absence as an empty string / `false` / zero instead of an error.
#[derive(Debug, Error)]
pub enum VitrinaError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// An action-required element never became actionable within its bound
    #[error("Element {selector} not found within {timeout_ms}ms")]
    ElementNotFound {
        /// Selector that failed to resolve
        selector: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// A bounded wait elapsed
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Page error (script evaluation, driver fault)
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Observed state did not match expected state
    #[error("Assertion failed: {message}")]
    Assertion {
        /// Error message
        message: String,
    },

    /// Session setup/teardown failed
    #[error("Fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// Unknown product-sort code
    #[error("Invalid sort option: {value}")]
    InvalidSortOption {
        /// The rejected option value
        value: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VitrinaError {
    /// Build an `ElementNotFound` from a selector description and timeout.
    #[must_use]
    pub fn element_not_found(selector: impl Into<String>, timeout_ms: u64) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
            timeout_ms,
        }
    }

    /// True for the absence-style failures a visibility probe may swallow.
    ///
    /// Only `ElementNotFound` and `Timeout` qualify; any other variant is a
    /// driver fault and must keep propagating.
    #[must_use]
    pub const fn is_absence(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. } | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_not_found_display() {
        let err = VitrinaError::element_not_found(".shopping_cart_badge", 3000);
        let msg = err.to_string();
        assert!(msg.contains(".shopping_cart_badge"));
        assert!(msg.contains("3000"));
    }

    #[test]
    fn test_navigation_display() {
        let err = VitrinaError::Navigation {
            url: "https://unreachable.invalid/".to_string(),
            message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
        };
        assert!(err.to_string().contains("unreachable.invalid"));
    }

    #[test]
    fn test_is_absence() {
        assert!(VitrinaError::element_not_found("#x", 100).is_absence());
        assert!(VitrinaError::Timeout { ms: 100 }.is_absence());
        assert!(!VitrinaError::Page {
            message: "boom".to_string()
        }
        .is_absence());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: VitrinaError = io.into();
        assert!(matches!(err, VitrinaError::Io(_)));
    }
}
