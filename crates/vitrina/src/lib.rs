//! Vitrina: browser-driven end-to-end test suite for the storefront demo
//! application.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     VITRINA Architecture                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐             │
//! │   │ Test       │    │ Page       │    │ PageDriver │             │
//! │   │ (verdicts) │───►│ Objects    │───►│ (CDP/mock) │──► live DOM │
//! │   └────────────┘    └────────────┘    └────────────┘             │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows one direction: test → page object → driver → DOM; results
//! flow back up as strings, counts and booleans the verification layer
//! compares against the reference data in [`data`].
//!
//! Page objects are composed over the narrow [`driver::PageDriver`]
//! capability interface, so the CDP backend (feature `browser`) and the
//! in-memory [`mock::MockStorefront`] are interchangeable beneath them.

#![warn(missing_docs)]

/// Browser and session lifecycle (feature `browser`)
pub mod browser;
/// Environment configuration, read once at process start
pub mod config;
/// Reference data for expected-value comparison
pub mod data;
/// Driver capability interface and the CDP backend
pub mod driver;
/// Locator primitives and JS query generation
pub mod locator;
/// Logging handle owned by the test entry point
pub mod logging;
/// In-memory storefront model backing browserless runs
pub mod mock;
/// Page objects (login, inventory) over the base abstraction
pub mod pages;
/// Pass/fail summaries and run artifacts
pub mod reporter;
/// Error taxonomy
pub mod result;
/// Per-test session fixtures
pub mod session;
/// Bounded polling helpers
pub mod wait;

#[cfg(feature = "browser")]
pub use browser::{Browser, BrowserConfig, Session};
pub use config::{BrowserKind, Environment};
pub use data::{CredentialCase, Product, SortOrder, User};
#[cfg(feature = "browser")]
pub use driver::CdpDriver;
pub use driver::PageDriver;
pub use locator::{Locator, LocatorOptions, Selector};
pub use logging::{LogConfig, LogHandle};
pub use mock::MockStorefront;
pub use pages::{BasePage, InventoryPage, LoginPage, ProductDetails};
pub use reporter::{RunSummary, TestRecord, TestStatus};
pub use result::{VitrinaError, VitrinaResult};
pub use session::TestSession;
pub use wait::{poll_until, WaitOptions};
