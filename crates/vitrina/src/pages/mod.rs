//! Page objects for the storefront under test.
//!
//! Each page object is a stateless facade over a shared driver handle plus
//! a fixed locator registry; several page objects may wrap the same session
//! at once (they are views, not owners).

pub mod base;
pub mod inventory;
pub mod login;

pub use base::BasePage;
pub use inventory::{InventoryPage, ProductDetails};
pub use login::LoginPage;
