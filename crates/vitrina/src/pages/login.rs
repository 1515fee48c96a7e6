//! Login page object.
//!
//! The page moves between three observable states: unauthenticated, error
//! shown, and authenticated. Submitting the form decides the outcome on the
//! application side; callers observe it afterwards via
//! [`LoginPage::is_error_displayed`] or by checking that the inventory page
//! loaded.

use crate::driver::PageDriver;
use crate::locator::{Locator, Selector};
use crate::pages::base::{join_url, BasePage};
use crate::result::VitrinaResult;
use std::sync::Arc;

/// Locator registry for the login form
#[derive(Debug, Clone)]
pub struct LoginLocators {
    /// Username input
    pub username_input: Selector,
    /// Password input
    pub password_input: Selector,
    /// Submit control
    pub login_button: Selector,
    /// Error banner
    pub error_message: Selector,
    /// Error dismiss control
    pub error_button: Selector,
}

impl Default for LoginLocators {
    fn default() -> Self {
        Self {
            username_input: Selector::css("[data-test='username']"),
            password_input: Selector::css("[data-test='password']"),
            login_button: Selector::css("[data-test='login-button']"),
            error_message: Selector::css("[data-test='error']"),
            error_button: Selector::css(".error-button"),
        }
    }
}

/// Page object for the login form
#[derive(Debug, Clone)]
pub struct LoginPage {
    base: BasePage,
    locators: LoginLocators,
    login_url: String,
}

impl LoginPage {
    /// Create a login page over a driver handle
    #[must_use]
    pub fn new(driver: Arc<dyn PageDriver>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let login_url = join_url(&base_url, crate::data::paths::LOGIN);
        Self {
            base: BasePage::new(driver, base_url),
            locators: LoginLocators::default(),
            login_url,
        }
    }

    /// Shared page operations
    #[must_use]
    pub const fn base(&self) -> &BasePage {
        &self.base
    }

    /// Load the login entry URL
    pub async fn navigate_to_login(&self) -> VitrinaResult<()> {
        self.base.navigate_to(&self.login_url).await
    }

    /// Type into the username field
    pub async fn enter_username(&self, username: &str) -> VitrinaResult<()> {
        self.base
            .fill_input(&self.locators.username_input, username)
            .await
    }

    /// Type into the password field
    pub async fn enter_password(&self, password: &str) -> VitrinaResult<()> {
        self.base
            .fill_input(&self.locators.password_input, password)
            .await
    }

    /// Click the submit control
    pub async fn click_login(&self) -> VitrinaResult<()> {
        self.base.click_element(&self.locators.login_button).await
    }

    /// Fill both fields and submit. The outcome (redirect vs. inline error)
    /// is observed afterwards, not returned here.
    pub async fn login(&self, username: &str, password: &str) -> VitrinaResult<()> {
        tracing::info!(username, "submitting login");
        self.enter_username(username).await?;
        self.enter_password(password).await?;
        self.click_login().await
    }

    /// Error banner text, or an empty string when no error is shown.
    pub async fn get_error_message(&self) -> VitrinaResult<String> {
        if self
            .base
            .is_element_visible(&self.locators.error_message)
            .await?
        {
            self.base.get_text(&self.locators.error_message).await
        } else {
            Ok(String::new())
        }
    }

    /// Whether the error banner is currently shown
    pub async fn is_error_displayed(&self) -> VitrinaResult<bool> {
        self.base
            .is_element_visible(&self.locators.error_message)
            .await
    }

    /// Dismiss the error banner if present. Idempotent: a no-op when no
    /// error is shown.
    pub async fn dismiss_error(&self) -> VitrinaResult<()> {
        if self
            .base
            .is_element_visible(&self.locators.error_button)
            .await?
        {
            self.base.click_element(&self.locators.error_button).await?;
        }
        Ok(())
    }

    /// Block until the form is ready, each control within the default
    /// locator budget.
    pub async fn wait_until_loaded(&self) -> VitrinaResult<()> {
        for selector in [
            &self.locators.username_input,
            &self.locators.password_input,
            &self.locators.login_button,
        ] {
            self.base
                .wait_for(&Locator::from_selector(selector.clone()))
                .await?;
        }
        Ok(())
    }

    /// The page's definition of ready: username field, password field and
    /// submit control all simultaneously visible.
    pub async fn is_login_page_loaded(&self) -> VitrinaResult<bool> {
        Ok(self
            .base
            .is_element_visible(&self.locators.username_input)
            .await?
            && self
                .base
                .is_element_visible(&self.locators.password_input)
                .await?
            && self
                .base
                .is_element_visible(&self.locators.login_button)
                .await?)
    }

    /// Label of the submit control
    pub async fn get_login_button_text(&self) -> VitrinaResult<String> {
        self.base.get_text(&self.locators.login_button).await
    }
}
