//! Reference data for the storefront under test.
//!
//! Loaded once per process and shared read-only across all tests; used only
//! for expected-value comparison, never mutated.

use crate::result::{VitrinaError, VitrinaResult};
use serde::{Deserialize, Serialize};

/// A user account accepted by the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name
    pub username: &'static str,
    /// Password
    pub password: &'static str,
    /// What distinguishes this account
    pub description: &'static str,
}

/// Accounts the application authenticates successfully
pub const VALID_USERS: [User; 4] = [
    User {
        username: "standard_user",
        password: "secret_sauce",
        description: "Standard user with normal functionality",
    },
    User {
        username: "performance_glitch_user",
        password: "secret_sauce",
        description: "User that experiences performance issues",
    },
    User {
        username: "problem_user",
        password: "secret_sauce",
        description: "User that experiences various UI issues",
    },
    User {
        username: "error_user",
        password: "secret_sauce",
        description: "User that experiences errors",
    },
];

/// The account the application refuses with the locked-out message
pub const LOCKED_OUT_USER: User = User {
    username: "locked_out_user",
    password: "secret_sauce",
    description: "User that has been locked out",
};

/// The canonical standard account used by authenticated fixtures
pub const STANDARD_USER: User = VALID_USERS[0];

/// A credential pair with the error the form is expected to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialCase {
    /// Login name submitted
    pub username: &'static str,
    /// Password submitted
    pub password: &'static str,
    /// Error text the form must display
    pub expected_error: &'static str,
}

/// Negative login cases. Empty username takes precedence over empty
/// password when both are empty.
pub const INVALID_CREDENTIALS: [CredentialCase; 6] = [
    CredentialCase {
        username: "locked_out_user",
        password: "secret_sauce",
        expected_error: errors::LOCKED_OUT,
    },
    CredentialCase {
        username: "invalid_user",
        password: "secret_sauce",
        expected_error: errors::INVALID_CREDENTIALS,
    },
    CredentialCase {
        username: "standard_user",
        password: "wrong_password",
        expected_error: errors::INVALID_CREDENTIALS,
    },
    CredentialCase {
        username: "",
        password: "secret_sauce",
        expected_error: errors::EMPTY_USERNAME,
    },
    CredentialCase {
        username: "standard_user",
        password: "",
        expected_error: errors::EMPTY_PASSWORD,
    },
    CredentialCase {
        username: "",
        password: "",
        expected_error: errors::EMPTY_USERNAME,
    },
];

/// A catalog product as rendered on the inventory page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name
    pub name: &'static str,
    /// Display price including currency symbol
    pub price: &'static str,
    /// Stable product id used in control element ids
    pub id: &'static str,
}

/// The catalog the inventory page is expected to render
pub const EXPECTED_PRODUCTS: [Product; 6] = [
    Product {
        name: "Sauce Labs Backpack",
        price: "$29.99",
        id: "sauce-labs-backpack",
    },
    Product {
        name: "Sauce Labs Bike Light",
        price: "$9.99",
        id: "sauce-labs-bike-light",
    },
    Product {
        name: "Sauce Labs Bolt T-Shirt",
        price: "$15.99",
        id: "sauce-labs-bolt-t-shirt",
    },
    Product {
        name: "Sauce Labs Fleece Jacket",
        price: "$49.99",
        id: "sauce-labs-fleece-jacket",
    },
    Product {
        name: "Sauce Labs Onesie",
        price: "$7.99",
        id: "sauce-labs-onesie",
    },
    Product {
        name: "Test.allTheThings() T-Shirt (Red)",
        price: "$15.99",
        id: "test.allthethings()-t-shirt-(red)",
    },
];

/// Product-sort orders offered by the inventory dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Name A → Z (lexicographic, case-sensitive as rendered)
    NameAscending,
    /// Name Z → A
    NameDescending,
    /// Price low → high (decimal compare after stripping the currency symbol)
    PriceLowHigh,
    /// Price high → low
    PriceHighLow,
}

impl SortOrder {
    /// The option value the dropdown uses for this order
    #[must_use]
    pub const fn as_value(&self) -> &'static str {
        match self {
            Self::NameAscending => "az",
            Self::NameDescending => "za",
            Self::PriceLowHigh => "lohi",
            Self::PriceHighLow => "hilo",
        }
    }

    /// Parse a dropdown option value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSortOption` for values the dropdown does not offer.
    pub fn parse(value: &str) -> VitrinaResult<Self> {
        match value {
            "az" => Ok(Self::NameAscending),
            "za" => Ok(Self::NameDescending),
            "lohi" => Ok(Self::PriceLowHigh),
            "hilo" => Ok(Self::PriceHighLow),
            other => Err(VitrinaError::InvalidSortOption {
                value: other.to_string(),
            }),
        }
    }

    /// All four orders, for parameterized tests
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::NameAscending,
            Self::NameDescending,
            Self::PriceLowHigh,
            Self::PriceHighLow,
        ]
    }
}

/// Canonical error messages the login form produces
pub mod errors {
    /// Locked-out account, regardless of password correctness
    pub const LOCKED_OUT: &str = "Sorry, this user has been locked out.";
    /// Populated credentials that match no account
    pub const INVALID_CREDENTIALS: &str =
        "Username and password do not match any user in this service";
    /// Empty username (takes precedence when both fields are empty)
    pub const EMPTY_USERNAME: &str = "Username is required";
    /// Non-empty username with empty password
    pub const EMPTY_PASSWORD: &str = "Password is required";
}

/// Canonical application paths, joined onto the configured base URL
pub mod paths {
    /// Login form (served at the origin root)
    pub const LOGIN: &str = "/";
    /// Inventory list
    pub const INVENTORY: &str = "/inventory.html";
    /// Cart contents
    pub const CART: &str = "/cart.html";
    /// Checkout: customer information
    pub const CHECKOUT_STEP_ONE: &str = "/checkout-step-one.html";
    /// Checkout: order overview
    pub const CHECKOUT_STEP_TWO: &str = "/checkout-step-two.html";
    /// Checkout: confirmation
    pub const CHECKOUT_COMPLETE: &str = "/checkout-complete.html";
}

/// Timeout budgets in milliseconds
pub mod timeouts {
    /// Locate-then-act default
    pub const DEFAULT: u64 = 5000;
    /// Safe visibility probe
    pub const SHORT: u64 = 3000;
    /// Slow transitions (navigation after submit)
    pub const LONG: u64 = 10_000;
    /// Budget for the performance-glitch account
    pub const PERFORMANCE_GLITCH: u64 = 15_000;
}

/// Parse a rendered price into its decimal amount.
///
/// Strips a single leading `$` if present.
///
/// # Errors
///
/// Returns `Assertion` when the remainder is not a decimal number.
pub fn parse_price(price: &str) -> VitrinaResult<f64> {
    let trimmed = price.trim();
    let amount = trimmed.strip_prefix('$').unwrap_or(trimmed);
    amount.parse().map_err(|_| VitrinaError::Assertion {
        message: format!("Price {price:?} is not a decimal amount"),
    })
}
