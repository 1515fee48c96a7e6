//! Test-session fixtures.
//!
//! A [`TestSession`] bundles one driver handle with both page objects. Each
//! test owns its session exclusively for its lifetime; nothing mutable is
//! shared across tests.

use crate::config::Environment;
use crate::data::STANDARD_USER;
use crate::driver::PageDriver;
use crate::pages::{InventoryPage, LoginPage};
use crate::result::{VitrinaError, VitrinaResult};
use std::sync::Arc;

/// One test's view of the application: a driver plus its page objects.
#[derive(Clone)]
pub struct TestSession {
    driver: Arc<dyn PageDriver>,
    login: LoginPage,
    inventory: InventoryPage,
}

impl std::fmt::Debug for TestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSession")
            .field("base_url", &self.login.base().base_url())
            .finish()
    }
}

impl TestSession {
    /// Build an unauthenticated session over a driver handle.
    #[must_use]
    pub fn new(driver: Arc<dyn PageDriver>, env: &Environment) -> Self {
        Self {
            login: LoginPage::new(driver.clone(), env.base_url.clone()),
            inventory: InventoryPage::new(driver.clone(), env.base_url.clone()),
            driver,
        }
    }

    /// Build a session already logged in as the given user.
    ///
    /// Navigates to the entry page, submits the credentials and verifies
    /// the inventory page loaded.
    ///
    /// # Errors
    ///
    /// Returns `Fixture` when the login flow does not end on a loaded
    /// inventory page (e.g. the form showed an error instead).
    pub async fn authenticated(
        driver: Arc<dyn PageDriver>,
        env: &Environment,
        username: &str,
        password: &str,
    ) -> VitrinaResult<Self> {
        let session = Self::new(driver, env);
        session.login.navigate_to_login().await?;
        session.login.login(username, password).await?;

        // The long budget here also covers the performance-glitch account.
        if let Err(e) = session.inventory.wait_until_loaded().await {
            if !e.is_absence() {
                return Err(e);
            }
            let error = session.login.get_error_message().await.unwrap_or_default();
            return Err(VitrinaError::Fixture {
                message: if error.is_empty() {
                    format!("Login as {username:?} did not reach the inventory page")
                } else {
                    format!("Login as {username:?} failed: {error}")
                },
            });
        }

        tracing::debug!(username, "authenticated session ready");
        Ok(session)
    }

    /// Build a session logged in as the standard account.
    pub async fn authenticated_standard(
        driver: Arc<dyn PageDriver>,
        env: &Environment,
    ) -> VitrinaResult<Self> {
        Self::authenticated(driver, env, STANDARD_USER.username, STANDARD_USER.password).await
    }

    /// The shared driver handle
    #[must_use]
    pub fn driver(&self) -> Arc<dyn PageDriver> {
        self.driver.clone()
    }

    /// The login page object
    #[must_use]
    pub const fn login_page(&self) -> &LoginPage {
        &self.login
    }

    /// The inventory page object
    #[must_use]
    pub const fn inventory_page(&self) -> &InventoryPage {
        &self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockStorefront;

    fn env() -> Environment {
        Environment::default()
    }

    #[tokio::test]
    async fn test_unauthenticated_session_starts_on_login() {
        let session = TestSession::new(Arc::new(MockStorefront::new()), &env());
        session.login_page().navigate_to_login().await.unwrap();
        assert!(session.login_page().is_login_page_loaded().await.unwrap());
        assert!(!session
            .inventory_page()
            .is_inventory_page_loaded()
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_authenticated_fixture_reaches_inventory() {
        let session =
            TestSession::authenticated_standard(Arc::new(MockStorefront::new()), &env())
                .await
                .unwrap();
        assert!(session
            .inventory_page()
            .is_inventory_page_loaded()
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_authenticated_fixture_fails_with_bad_credentials() {
        let result = TestSession::authenticated(
            Arc::new(MockStorefront::new()),
            &env(),
            "invalid_user",
            "wrong_password",
        )
        .await;
        match result {
            Err(VitrinaError::Fixture { message }) => {
                assert!(message.contains("invalid_user"));
            }
            other => panic!("expected fixture error, got {other:?}"),
        }
    }
}
