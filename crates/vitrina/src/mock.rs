//! In-memory model of the storefront, exposed through [`PageDriver`].
//!
//! [`MockStorefront`] reproduces the external contracts the suite verifies
//! (login error precedence, cart badge rendering, sort re-ordering, menu
//! navigation) so the page objects and the verification layer can be
//! exercised without a browser. It models the DOM at the granularity of the
//! selectors the page objects use; selectors outside that registry resolve
//! to nothing, exactly like a typo would against the live site.

use crate::data::{self, SortOrder, EXPECTED_PRODUCTS, LOCKED_OUT_USER, VALID_USERS};
use crate::driver::PageDriver;
use crate::locator::Selector;
use crate::result::{VitrinaError, VitrinaResult};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Minimal PNG header used for mock screenshot payloads
const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone)]
struct ModelProduct {
    name: &'static str,
    price: &'static str,
    description: String,
    in_cart: bool,
}

#[derive(Debug)]
struct ModelState {
    url: String,
    username_field: String,
    password_field: String,
    error: Option<String>,
    logged_in: bool,
    menu_open: bool,
    products: Vec<ModelProduct>,
}

/// Scripted storefront backend implementing the full driver capability set.
#[derive(Debug)]
pub struct MockStorefront {
    base_url: String,
    state: Mutex<ModelState>,
}

impl MockStorefront {
    /// Create a model serving the default origin
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(crate::config::DEFAULT_BASE_URL)
    }

    /// Create a model serving `base_url`
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let products = EXPECTED_PRODUCTS
            .iter()
            .map(|p| ModelProduct {
                name: p.name,
                price: p.price,
                description: format!("carry.allTheThings() with the {}", p.name),
                in_cart: false,
            })
            .collect();
        Self {
            state: Mutex::new(ModelState {
                url: format!("{}/", base_url.trim_end_matches('/')),
                username_field: String::new(),
                password_field: String::new(),
                error: None,
                logged_in: false,
                menu_open: false,
                products,
            }),
            base_url,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ModelState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn on_login_page(state: &ModelState) -> bool {
        !state.logged_in
    }

    fn on_inventory_page(state: &ModelState) -> bool {
        state.logged_in && state.url.contains("inventory")
    }

    /// Decide the login outcome with the documented precedence: empty
    /// username, then empty password, then the locked-out account, then a
    /// membership check against the valid-user table.
    fn submit_login(state: &mut ModelState, base_url: &str) {
        let username = state.username_field.clone();
        let password = state.password_field.clone();

        if username.is_empty() {
            state.error = Some(data::errors::EMPTY_USERNAME.to_string());
        } else if password.is_empty() {
            state.error = Some(data::errors::EMPTY_PASSWORD.to_string());
        } else if username == LOCKED_OUT_USER.username {
            state.error = Some(data::errors::LOCKED_OUT.to_string());
        } else if VALID_USERS
            .iter()
            .any(|u| u.username == username && u.password == password)
        {
            state.error = None;
            state.logged_in = true;
            state.url = format!("{}/inventory.html", base_url.trim_end_matches('/'));
        } else {
            state.error = Some(data::errors::INVALID_CREDENTIALS.to_string());
        }
    }

    fn apply_sort(state: &mut ModelState, order: SortOrder) {
        match order {
            SortOrder::NameAscending => state.products.sort_by(|a, b| a.name.cmp(b.name)),
            SortOrder::NameDescending => state.products.sort_by(|a, b| b.name.cmp(a.name)),
            SortOrder::PriceLowHigh => state.products.sort_by(|a, b| {
                price_of(a)
                    .partial_cmp(&price_of(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            SortOrder::PriceHighLow => state.products.sort_by(|a, b| {
                price_of(b)
                    .partial_cmp(&price_of(a))
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
    }

    /// Resolve a selector against the modeled DOM.
    ///
    /// Returns the targets currently present, in render order. Visibility is
    /// decided separately: an element can exist yet not be rendered (the
    /// logout link while the menu is closed).
    fn resolve(state: &ModelState, selector: &Selector) -> Vec<Target> {
        match selector {
            Selector::Css(css) => Self::resolve_css(state, css, None),
            Selector::CssWithText { css, text } => {
                let row = Self::row_index_matching(state, text);
                match (css.as_str(), row) {
                    (".inventory_item", Some(idx)) => vec![Target::Row(idx)],
                    _ => Vec::new(),
                }
            }
            Selector::Within { scope, inner } => {
                let scopes = Self::resolve(state, scope);
                let Some(Target::Row(idx)) = scopes.first() else {
                    return Vec::new();
                };
                let inner_css = match inner.as_ref() {
                    Selector::Css(css) | Selector::CssWithText { css, .. } => css.as_str(),
                    Selector::Within { .. } => return Vec::new(),
                };
                Self::resolve_css(state, inner_css, Some(*idx))
            }
        }
    }

    fn row_index_matching(state: &ModelState, text: &str) -> Option<usize> {
        if !Self::on_inventory_page(state) {
            return None;
        }
        state.products.iter().position(|p| {
            p.name.contains(text) || p.description.contains(text) || p.price.contains(text)
        })
    }

    fn resolve_css(state: &ModelState, css: &str, row: Option<usize>) -> Vec<Target> {
        let rows: Vec<usize> = match row {
            Some(idx) => vec![idx],
            None => (0..state.products.len()).collect(),
        };
        match css {
            "[data-test='username']" if Self::on_login_page(state) => vec![Target::UsernameInput],
            "[data-test='password']" if Self::on_login_page(state) => vec![Target::PasswordInput],
            "[data-test='login-button']" if Self::on_login_page(state) => {
                vec![Target::LoginButton]
            }
            "[data-test='error']" if state.error.is_some() => vec![Target::ErrorBanner],
            ".error-button" if state.error.is_some() => vec![Target::ErrorDismiss],
            ".inventory_container" | ".inventory_list" if Self::on_inventory_page(state) => {
                vec![Target::InventoryContainer]
            }
            ".inventory_item" if Self::on_inventory_page(state) => {
                rows.into_iter().map(Target::Row).collect()
            }
            ".inventory_item_name" if Self::on_inventory_page(state) => {
                rows.into_iter().map(Target::Name).collect()
            }
            ".inventory_item_desc" if Self::on_inventory_page(state) => {
                rows.into_iter().map(Target::Description).collect()
            }
            ".inventory_item_price" if Self::on_inventory_page(state) => {
                rows.into_iter().map(Target::Price).collect()
            }
            "button[id^='add-to-cart']" if Self::on_inventory_page(state) => rows
                .into_iter()
                .filter(|i| !state.products[*i].in_cart)
                .map(Target::AddButton)
                .collect(),
            "button[id^='remove']" if Self::on_inventory_page(state) => rows
                .into_iter()
                .filter(|i| state.products[*i].in_cart)
                .map(Target::RemoveButton)
                .collect(),
            ".shopping_cart_link" if state.logged_in => vec![Target::CartLink],
            ".shopping_cart_badge"
                if state.logged_in && state.products.iter().any(|p| p.in_cart) =>
            {
                vec![Target::CartBadge]
            }
            ".product_sort_container" if Self::on_inventory_page(state) => {
                vec![Target::SortDropdown]
            }
            "#react-burger-menu-btn" if state.logged_in => vec![Target::MenuButton],
            "#logout_sidebar_link" if state.logged_in => vec![Target::LogoutLink],
            _ => Vec::new(),
        }
    }

    fn target_visible(state: &ModelState, target: &Target) -> bool {
        match target {
            // The logout link exists in the DOM but only renders once the
            // hamburger menu has been opened.
            Target::LogoutLink => state.menu_open,
            _ => true,
        }
    }

    fn target_text(state: &ModelState, target: &Target) -> String {
        match target {
            Target::ErrorBanner => state.error.clone().unwrap_or_default(),
            Target::LoginButton => "Login".to_string(),
            Target::Name(i) => state.products[*i].name.to_string(),
            Target::Description(i) => state.products[*i].description.clone(),
            Target::Price(i) => state.products[*i].price.to_string(),
            Target::Row(i) => {
                let p = &state.products[*i];
                format!("{} {} {}", p.name, p.description, p.price)
            }
            Target::AddButton(_) => "Add to cart".to_string(),
            Target::RemoveButton(_) => "Remove".to_string(),
            Target::CartBadge => state
                .products
                .iter()
                .filter(|p| p.in_cart)
                .count()
                .to_string(),
            _ => String::new(),
        }
    }

    fn click_target(&self, state: &mut ModelState, target: &Target) {
        match target {
            Target::LoginButton => Self::submit_login(state, &self.base_url),
            Target::ErrorDismiss => state.error = None,
            Target::AddButton(i) => state.products[*i].in_cart = true,
            Target::RemoveButton(i) => state.products[*i].in_cart = false,
            Target::MenuButton => state.menu_open = true,
            Target::LogoutLink => {
                state.logged_in = false;
                state.menu_open = false;
                state.url = format!("{}/", self.base_url.trim_end_matches('/'));
            }
            Target::CartLink => {
                state.url = format!("{}/cart.html", self.base_url.trim_end_matches('/'));
            }
            _ => {}
        }
    }
}

impl Default for MockStorefront {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    UsernameInput,
    PasswordInput,
    LoginButton,
    ErrorBanner,
    ErrorDismiss,
    InventoryContainer,
    Row(usize),
    Name(usize),
    Description(usize),
    Price(usize),
    AddButton(usize),
    RemoveButton(usize),
    CartLink,
    CartBadge,
    SortDropdown,
    MenuButton,
    LogoutLink,
}

fn price_of(product: &ModelProduct) -> f64 {
    data::parse_price(product.price).unwrap_or(f64::MAX)
}

#[async_trait]
impl PageDriver for MockStorefront {
    async fn navigate(&self, url: &str) -> VitrinaResult<()> {
        if !url.starts_with(&self.base_url) {
            return Err(VitrinaError::Navigation {
                url: url.to_string(),
                message: "destination outside the modeled origin".to_string(),
            });
        }
        let mut state = self.lock();
        state.url = url.to_string();
        state.menu_open = false;
        // A fresh load of the entry page clears form state and any banner.
        if !state.logged_in {
            state.username_field.clear();
            state.password_field.clear();
            state.error = None;
        }
        Ok(())
    }

    async fn wait_for_visible(&self, selector: &Selector, timeout: Duration) -> VitrinaResult<()> {
        // Model state changes synchronously, so one probe decides the wait.
        if self.is_visible(selector).await? {
            Ok(())
        } else {
            Err(VitrinaError::element_not_found(
                selector.describe(),
                timeout.as_millis() as u64,
            ))
        }
    }

    async fn click(&self, selector: &Selector) -> VitrinaResult<()> {
        let mut state = self.lock();
        let targets = Self::resolve(&state, selector);
        let target = targets
            .iter()
            .find(|t| Self::target_visible(&state, t))
            .cloned()
            .ok_or_else(|| VitrinaError::element_not_found(selector.describe(), 0))?;
        self.click_target(&mut state, &target);
        Ok(())
    }

    async fn fill(&self, selector: &Selector, text: &str) -> VitrinaResult<()> {
        let mut state = self.lock();
        let targets = Self::resolve(&state, selector);
        match targets.first() {
            Some(Target::UsernameInput) => {
                state.username_field = text.to_string();
                Ok(())
            }
            Some(Target::PasswordInput) => {
                state.password_field = text.to_string();
                Ok(())
            }
            Some(_) | None => Err(VitrinaError::element_not_found(selector.describe(), 0)),
        }
    }

    async fn text_content(&self, selector: &Selector) -> VitrinaResult<Option<String>> {
        let state = self.lock();
        Ok(Self::resolve(&state, selector)
            .first()
            .map(|t| Self::target_text(&state, t)))
    }

    async fn all_text_contents(&self, selector: &Selector) -> VitrinaResult<Vec<String>> {
        let state = self.lock();
        Ok(Self::resolve(&state, selector)
            .iter()
            .map(|t| Self::target_text(&state, t))
            .collect())
    }

    async fn count(&self, selector: &Selector) -> VitrinaResult<usize> {
        let state = self.lock();
        Ok(Self::resolve(&state, selector).len())
    }

    async fn is_visible(&self, selector: &Selector) -> VitrinaResult<bool> {
        let state = self.lock();
        Ok(Self::resolve(&state, selector)
            .iter()
            .any(|t| Self::target_visible(&state, t)))
    }

    async fn select_option(&self, selector: &Selector, value: &str) -> VitrinaResult<()> {
        let order = SortOrder::parse(value)?;
        let mut state = self.lock();
        let targets = Self::resolve(&state, selector);
        if !targets.contains(&Target::SortDropdown) {
            return Err(VitrinaError::element_not_found(selector.describe(), 0));
        }
        Self::apply_sort(&mut state, order);
        Ok(())
    }

    async fn screenshot(&self) -> VitrinaResult<Vec<u8>> {
        Ok(PNG_MAGIC.to_vec())
    }

    async fn current_url(&self) -> VitrinaResult<String> {
        Ok(self.lock().url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::errors;

    fn login_selectors() -> (Selector, Selector, Selector, Selector) {
        (
            Selector::css("[data-test='username']"),
            Selector::css("[data-test='password']"),
            Selector::css("[data-test='login-button']"),
            Selector::css("[data-test='error']"),
        )
    }

    async fn submit(
        store: &MockStorefront,
        username: &str,
        password: &str,
    ) -> VitrinaResult<Option<String>> {
        let (user, pass, button, error) = login_selectors();
        store.fill(&user, username).await?;
        store.fill(&pass, password).await?;
        store.click(&button).await?;
        store.text_content(&error).await
    }

    mod login_precedence_tests {
        use super::*;

        #[tokio::test]
        async fn test_empty_username_wins_over_empty_password() {
            let store = MockStorefront::new();
            let error = submit(&store, "", "").await.unwrap().unwrap();
            assert!(error.contains(errors::EMPTY_USERNAME));
        }

        #[tokio::test]
        async fn test_empty_password_with_username() {
            let store = MockStorefront::new();
            let error = submit(&store, "standard_user", "").await.unwrap().unwrap();
            assert!(error.contains(errors::EMPTY_PASSWORD));
        }

        #[tokio::test]
        async fn test_locked_out_regardless_of_password() {
            let store = MockStorefront::new();
            let error = submit(&store, "locked_out_user", "not_the_password")
                .await
                .unwrap()
                .unwrap();
            assert!(error.contains(errors::LOCKED_OUT));
        }

        #[tokio::test]
        async fn test_mismatch_message() {
            let store = MockStorefront::new();
            let error = submit(&store, "invalid_user", "wrong_password")
                .await
                .unwrap()
                .unwrap();
            assert!(error.contains(errors::INVALID_CREDENTIALS));
        }

        #[tokio::test]
        async fn test_valid_login_redirects() {
            let store = MockStorefront::new();
            let error = submit(&store, "standard_user", "secret_sauce").await.unwrap();
            assert!(error.is_none());
            assert!(store.current_url().await.unwrap().contains("inventory"));
        }
    }

    mod dom_model_tests {
        use super::*;

        #[tokio::test]
        async fn test_inventory_hidden_before_login() {
            let store = MockStorefront::new();
            let visible = store
                .is_visible(&Selector::css(".inventory_list"))
                .await
                .unwrap();
            assert!(!visible);
        }

        #[tokio::test]
        async fn test_add_button_swaps_to_remove() {
            let store = MockStorefront::new();
            submit(&store, "standard_user", "secret_sauce").await.unwrap();

            let row = Selector::css_with_text(".inventory_item", "Sauce Labs Backpack");
            let add = row.clone().within(Selector::css("button[id^='add-to-cart']"));
            let remove = row.within(Selector::css("button[id^='remove']"));

            store.click(&add).await.unwrap();
            // The add control is gone for this row; a second add must fail.
            assert!(store.click(&add).await.is_err());
            store.click(&remove).await.unwrap();
            assert!(store.click(&remove).await.is_err());
        }

        #[tokio::test]
        async fn test_badge_absent_for_empty_cart() {
            let store = MockStorefront::new();
            submit(&store, "standard_user", "secret_sauce").await.unwrap();
            let badge = Selector::css(".shopping_cart_badge");
            assert!(!store.is_visible(&badge).await.unwrap());
        }

        #[tokio::test]
        async fn test_logout_link_needs_open_menu() {
            let store = MockStorefront::new();
            submit(&store, "standard_user", "secret_sauce").await.unwrap();
            let link = Selector::css("#logout_sidebar_link");
            assert!(!store.is_visible(&link).await.unwrap());
            store
                .click(&Selector::css("#react-burger-menu-btn"))
                .await
                .unwrap();
            assert!(store.is_visible(&link).await.unwrap());
        }

        #[tokio::test]
        async fn test_navigation_off_origin_fails() {
            let store = MockStorefront::new();
            let result = store.navigate("https://unrelated.example/").await;
            assert!(matches!(result, Err(VitrinaError::Navigation { .. })));
        }

        #[tokio::test]
        async fn test_unknown_selector_resolves_to_nothing() {
            let store = MockStorefront::new();
            assert_eq!(
                store.count(&Selector::css(".does_not_exist")).await.unwrap(),
                0
            );
            assert!(store
                .text_content(&Selector::css(".does_not_exist"))
                .await
                .unwrap()
                .is_none());
        }
    }
}
