//! Inventory-flow verification against the in-memory storefront backend.
//!
//! Sorting expectations are recomputed locally from the observed sequence;
//! cart expectations are phrased as deltas against the observed badge.

use proptest::prelude::*;
use std::sync::Arc;
use vitrina::data::{parse_price, SortOrder, EXPECTED_PRODUCTS};
use vitrina::{Environment, MockStorefront, PageDriver, TestSession};

async fn authenticated_session() -> TestSession {
    let driver: Arc<dyn PageDriver> = Arc::new(MockStorefront::new());
    TestSession::authenticated_standard(driver, &Environment::default())
        .await
        .expect("authenticated fixture")
}

#[tokio::test]
async fn inventory_page_loads_with_products() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    assert!(inventory.is_inventory_page_loaded().await.unwrap());
    assert!(
        inventory.get_product_count().await.unwrap() > 0,
        "products should be displayed"
    );
}

#[tokio::test]
async fn names_prices_and_count_always_agree() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    let names = inventory.get_product_names().await.unwrap();
    let prices = inventory.get_product_prices().await.unwrap();
    let count = inventory.get_product_count().await.unwrap();

    assert!(!names.is_empty());
    assert_eq!(names.len(), prices.len(), "each product has a name and price");
    assert_eq!(names.len(), count);

    for price in &prices {
        assert!(price.contains('$'), "price should contain $, got: {price}");
    }
}

#[tokio::test]
async fn add_product_increments_badge_by_one() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    let initial = inventory.get_cart_badge_count().await.unwrap();
    let names = inventory.get_product_names().await.unwrap();
    inventory
        .add_product_to_cart_by_name(&names[0])
        .await
        .unwrap();

    assert_eq!(inventory.get_cart_badge_count().await.unwrap(), initial + 1);
}

#[tokio::test]
async fn remove_product_decrements_badge_by_one() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    let names = inventory.get_product_names().await.unwrap();
    inventory
        .add_product_to_cart_by_name(&names[0])
        .await
        .unwrap();
    let after_add = inventory.get_cart_badge_count().await.unwrap();

    inventory
        .remove_product_from_cart_by_name(&names[0])
        .await
        .unwrap();

    assert_eq!(
        inventory.get_cart_badge_count().await.unwrap(),
        after_add - 1
    );
}

#[tokio::test]
async fn add_then_remove_restores_absent_badge() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    let initial = inventory.get_cart_badge_count().await.unwrap();
    assert_eq!(initial, 0, "fresh session starts with an empty cart");

    inventory
        .add_product_to_cart_by_name("Sauce Labs Backpack")
        .await
        .unwrap();
    inventory
        .remove_product_from_cart_by_name("Sauce Labs Backpack")
        .await
        .unwrap();

    // Removing the only item leaves no badge at all, which reads as zero.
    assert_eq!(inventory.get_cart_badge_count().await.unwrap(), initial);
}

#[tokio::test]
async fn add_multiple_products() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    let initial = inventory.get_cart_badge_count().await.unwrap();
    let names = inventory.get_product_names().await.unwrap();
    for name in names.iter().take(3) {
        inventory.add_product_to_cart_by_name(name).await.unwrap();
    }

    assert_eq!(
        inventory.get_cart_badge_count().await.unwrap(),
        initial + 3
    );
}

#[tokio::test]
async fn sort_products_name_ascending() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    let before = inventory.get_product_names().await.unwrap();
    inventory
        .sort_products(SortOrder::NameAscending)
        .await
        .unwrap();
    let after = inventory.get_product_names().await.unwrap();

    let mut expected = before;
    expected.sort();
    assert_eq!(after, expected, "products should be sorted A-Z");
}

#[tokio::test]
async fn sort_products_name_descending_is_exact_reverse() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    inventory
        .sort_products(SortOrder::NameAscending)
        .await
        .unwrap();
    let ascending = inventory.get_product_names().await.unwrap();

    inventory
        .sort_products(SortOrder::NameDescending)
        .await
        .unwrap();
    let descending = inventory.get_product_names().await.unwrap();

    let mut reversed = ascending;
    reversed.reverse();
    assert_eq!(descending, reversed, "Z-A is the exact reverse of A-Z");
}

#[tokio::test]
async fn sort_products_price_low_to_high() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    inventory
        .sort_products(SortOrder::PriceLowHigh)
        .await
        .unwrap();
    let prices: Vec<f64> = inventory
        .get_product_prices()
        .await
        .unwrap()
        .iter()
        .map(|p| parse_price(p).unwrap())
        .collect();

    for pair in prices.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "prices should be non-decreasing: {prices:?}"
        );
    }
}

#[tokio::test]
async fn sort_products_price_high_to_low() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    inventory
        .sort_products(SortOrder::PriceHighLow)
        .await
        .unwrap();
    let prices: Vec<f64> = inventory
        .get_product_prices()
        .await
        .unwrap()
        .iter()
        .map(|p| parse_price(p).unwrap())
        .collect();

    for pair in prices.windows(2) {
        assert!(
            pair[0] >= pair[1],
            "prices should be non-increasing: {prices:?}"
        );
    }
}

#[tokio::test]
async fn sorting_is_idempotent_and_preserves_the_catalog() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    inventory
        .sort_products(SortOrder::NameAscending)
        .await
        .unwrap();
    let first = inventory.get_product_names().await.unwrap();

    inventory
        .sort_products(SortOrder::NameAscending)
        .await
        .unwrap();
    let second = inventory.get_product_names().await.unwrap();
    assert_eq!(first, second);

    let mut observed = first;
    observed.sort();
    let mut catalog: Vec<String> = EXPECTED_PRODUCTS.iter().map(|p| p.name.to_string()).collect();
    catalog.sort();
    assert_eq!(observed, catalog, "sorting must not add or drop products");
}

#[tokio::test]
async fn product_details_match_the_catalog() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    for product in &EXPECTED_PRODUCTS {
        let details = inventory
            .get_product_details_by_name(product.name)
            .await
            .unwrap();
        assert_eq!(details.name, product.name);
        assert_eq!(details.price, product.price);
        assert!(!details.description.is_empty());
    }
}

#[tokio::test]
async fn cart_page_reachable_from_inventory() {
    let session = authenticated_session().await;
    let inventory = session.inventory_page();

    inventory.click_shopping_cart().await.unwrap();
    let url = inventory.base().current_url().await.unwrap();
    assert!(url.contains("cart"), "URL should contain 'cart', got {url}");
}

proptest! {
    /// Price comparison used by the sort verdicts is a total order over the
    /// rendered price format.
    #[test]
    fn parsed_prices_compare_consistently(cents in 1u32..100_000, other in 1u32..100_000) {
        let a = format!("${}.{:02}", cents / 100, cents % 100);
        let b = format!("${}.{:02}", other / 100, other % 100);
        let pa = parse_price(&a).unwrap();
        let pb = parse_price(&b).unwrap();
        prop_assert_eq!(pa <= pb, cents <= other);
    }
}
