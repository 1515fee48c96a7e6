//! Inventory page object: product enumeration, cart mutation, sorting,
//! navigation, logout.

use crate::data::SortOrder;
use crate::driver::PageDriver;
use crate::locator::{Locator, Selector};
use crate::pages::base::{join_url, BasePage};
use crate::result::VitrinaResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Locator registry for the inventory page
#[derive(Debug, Clone)]
pub struct InventoryLocators {
    /// Product-list container
    pub inventory_container: Selector,
    /// Product list element
    pub inventory_list: Selector,
    /// One product row
    pub inventory_items: Selector,
    /// Product name within a row
    pub item_names: Selector,
    /// Product description within a row
    pub item_descriptions: Selector,
    /// Product price within a row
    pub item_prices: Selector,
    /// Add-to-cart control within a row
    pub add_to_cart_buttons: Selector,
    /// Remove control within a row
    pub remove_buttons: Selector,
    /// Cart link in the header
    pub shopping_cart_link: Selector,
    /// Cart badge; absent when the cart is empty
    pub shopping_cart_badge: Selector,
    /// Sort dropdown
    pub product_sort_dropdown: Selector,
    /// Hamburger menu control
    pub menu_button: Selector,
    /// Logout control inside the menu
    pub logout_link: Selector,
}

impl Default for InventoryLocators {
    fn default() -> Self {
        Self {
            inventory_container: Selector::css(".inventory_container"),
            inventory_list: Selector::css(".inventory_list"),
            inventory_items: Selector::css(".inventory_item"),
            item_names: Selector::css(".inventory_item_name"),
            item_descriptions: Selector::css(".inventory_item_desc"),
            item_prices: Selector::css(".inventory_item_price"),
            add_to_cart_buttons: Selector::css("button[id^='add-to-cart']"),
            remove_buttons: Selector::css("button[id^='remove']"),
            shopping_cart_link: Selector::css(".shopping_cart_link"),
            shopping_cart_badge: Selector::css(".shopping_cart_badge"),
            product_sort_dropdown: Selector::css(".product_sort_container"),
            menu_button: Selector::css("#react-burger-menu-btn"),
            logout_link: Selector::css("#logout_sidebar_link"),
        }
    }
}

/// Details of one product row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Display name
    pub name: String,
    /// Display price including currency symbol
    pub price: String,
    /// Description text
    pub description: String,
}

/// Page object for the inventory list
#[derive(Debug, Clone)]
pub struct InventoryPage {
    base: BasePage,
    locators: InventoryLocators,
    inventory_url: String,
}

impl InventoryPage {
    /// Create an inventory page over a driver handle
    #[must_use]
    pub fn new(driver: Arc<dyn PageDriver>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let inventory_url = join_url(&base_url, crate::data::paths::INVENTORY);
        Self {
            base: BasePage::new(driver, base_url),
            locators: InventoryLocators::default(),
            inventory_url,
        }
    }

    /// Shared page operations
    #[must_use]
    pub const fn base(&self) -> &BasePage {
        &self.base
    }

    /// Load the inventory URL directly
    pub async fn navigate_to_inventory(&self) -> VitrinaResult<()> {
        self.base.navigate_to(&self.inventory_url).await
    }

    /// Block until the product list is ready, with the long budget that
    /// also covers the performance-glitch account.
    pub async fn wait_until_loaded(&self) -> VitrinaResult<()> {
        let budget = Duration::from_millis(crate::data::timeouts::LONG);
        for selector in [
            &self.locators.inventory_container,
            &self.locators.inventory_list,
        ] {
            self.base
                .wait_for(&Locator::from_selector(selector.clone()).with_timeout(budget))
                .await?;
        }
        Ok(())
    }

    /// Ready iff both the container and the list element are visible
    pub async fn is_inventory_page_loaded(&self) -> VitrinaResult<bool> {
        Ok(self
            .base
            .is_element_visible(&self.locators.inventory_container)
            .await?
            && self
                .base
                .is_element_visible(&self.locators.inventory_list)
                .await?)
    }

    /// Product names in DOM order. Sort tests compare this sequence against
    /// a locally recomputed sorted copy, so order matters.
    pub async fn get_product_names(&self) -> VitrinaResult<Vec<String>> {
        self.base
            .driver()
            .all_text_contents(&self.locators.item_names)
            .await
    }

    /// Product prices in DOM order
    pub async fn get_product_prices(&self) -> VitrinaResult<Vec<String>> {
        self.base
            .driver()
            .all_text_contents(&self.locators.item_prices)
            .await
    }

    /// Number of rendered product rows
    pub async fn get_product_count(&self) -> VitrinaResult<usize> {
        self.base
            .driver()
            .count(&self.locators.inventory_items)
            .await
    }

    /// Add the product whose row text contains `name` to the cart.
    /// The first matching row is acted on.
    pub async fn add_product_to_cart_by_name(&self, name: &str) -> VitrinaResult<()> {
        tracing::info!(product = name, "adding to cart");
        let button = self
            .row_matching(name)
            .within(self.locators.add_to_cart_buttons.clone());
        self.base.click_element(&button).await
    }

    /// Remove the product whose row text contains `name` from the cart.
    pub async fn remove_product_from_cart_by_name(&self, name: &str) -> VitrinaResult<()> {
        tracing::info!(product = name, "removing from cart");
        let button = self
            .row_matching(name)
            .within(self.locators.remove_buttons.clone());
        self.base.click_element(&button).await
    }

    /// Cart badge count. The badge is absent for an empty cart, which reads
    /// as zero, not as an unknown.
    pub async fn get_cart_badge_count(&self) -> VitrinaResult<u32> {
        if self
            .base
            .is_element_visible(&self.locators.shopping_cart_badge)
            .await?
        {
            let text = self
                .base
                .get_text(&self.locators.shopping_cart_badge)
                .await?;
            Ok(text.trim().parse().unwrap_or(0))
        } else {
            Ok(0)
        }
    }

    /// Open the cart page
    pub async fn click_shopping_cart(&self) -> VitrinaResult<()> {
        self.base
            .click_element(&self.locators.shopping_cart_link)
            .await
    }

    /// Apply a sort order through the dropdown. The list re-renders before
    /// the next read; callers observing a slow backend should wait on the
    /// list element first.
    pub async fn sort_products(&self, order: SortOrder) -> VitrinaResult<()> {
        tracing::info!(order = order.as_value(), "sorting products");
        self.base
            .driver()
            .select_option(&self.locators.product_sort_dropdown, order.as_value())
            .await
    }

    /// Open the hamburger menu
    pub async fn open_menu(&self) -> VitrinaResult<()> {
        self.base.click_element(&self.locators.menu_button).await
    }

    /// Log out: open the menu, wait for the logout control, click it.
    /// Returns the session to the unauthenticated entry page.
    pub async fn logout(&self) -> VitrinaResult<()> {
        tracing::info!("logging out");
        self.open_menu().await?;
        self.base
            .wait_for_element(
                &self.locators.logout_link,
                Duration::from_millis(crate::data::timeouts::DEFAULT),
            )
            .await?;
        self.base.click_element(&self.locators.logout_link).await
    }

    /// Name, price and description of the first row matching `name`
    pub async fn get_product_details_by_name(&self, name: &str) -> VitrinaResult<ProductDetails> {
        let row = self.row_matching(name);
        let name_text = self
            .base
            .get_text(&row.clone().within(self.locators.item_names.clone()))
            .await?;
        let price = self
            .base
            .get_text(&row.clone().within(self.locators.item_prices.clone()))
            .await?;
        let description = self
            .base
            .get_text(&row.within(self.locators.item_descriptions.clone()))
            .await?;
        Ok(ProductDetails {
            name: name_text,
            price,
            description,
        })
    }

    fn row_matching(&self, name: &str) -> Selector {
        Selector::css_with_text(".inventory_item", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EXPECTED_PRODUCTS, STANDARD_USER};
    use crate::mock::MockStorefront;
    use crate::pages::login::LoginPage;

    async fn authenticated_inventory() -> InventoryPage {
        let driver: Arc<dyn crate::driver::PageDriver> = Arc::new(MockStorefront::new());
        let login = LoginPage::new(driver.clone(), crate::config::DEFAULT_BASE_URL);
        login.navigate_to_login().await.unwrap();
        login
            .login(STANDARD_USER.username, STANDARD_USER.password)
            .await
            .unwrap();
        InventoryPage::new(driver, crate::config::DEFAULT_BASE_URL)
    }

    #[tokio::test]
    async fn test_loaded_after_login() {
        let page = authenticated_inventory().await;
        assert!(page.is_inventory_page_loaded().await.unwrap());
    }

    #[tokio::test]
    async fn test_names_prices_count_agree() {
        let page = authenticated_inventory().await;
        let names = page.get_product_names().await.unwrap();
        let prices = page.get_product_prices().await.unwrap();
        let count = page.get_product_count().await.unwrap();
        assert_eq!(names.len(), prices.len());
        assert_eq!(names.len(), count);
        assert_eq!(count, EXPECTED_PRODUCTS.len());
    }

    #[tokio::test]
    async fn test_product_details() {
        let page = authenticated_inventory().await;
        let details = page
            .get_product_details_by_name("Sauce Labs Backpack")
            .await
            .unwrap();
        assert_eq!(details.name, "Sauce Labs Backpack");
        assert_eq!(details.price, "$29.99");
        assert!(!details.description.is_empty());
    }

    #[tokio::test]
    async fn test_badge_parse_and_absent_as_zero() {
        let page = authenticated_inventory().await;
        assert_eq!(page.get_cart_badge_count().await.unwrap(), 0);
        page.add_product_to_cart_by_name("Sauce Labs Onesie")
            .await
            .unwrap();
        assert_eq!(page.get_cart_badge_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_logout_returns_to_login() {
        let page = authenticated_inventory().await;
        page.logout().await.unwrap();
        let login = LoginPage::new(page.base().driver(), crate::config::DEFAULT_BASE_URL);
        assert!(login.is_login_page_loaded().await.unwrap());
        assert!(!page.is_inventory_page_loaded().await.unwrap());
    }
}
