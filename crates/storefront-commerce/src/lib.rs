//! Domain logic for the storefront: catalog lookups, the session cart,
//! review ratings and checkout payloads.
//!
//! - **Catalog**: read-only product snapshot from the GraphQL API
//! - **Cart**: quantity bookkeeping, totals, free-shipping threshold and the
//!   "added to cart" highlight
//! - **Reviews**: average rating and star distribution
//! - **Checkout**: the `createCheckout` mutation payload
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_commerce::prelude::*;
//!
//! # async fn run() -> Result<(), CommerceError> {
//! let catalog = Catalog::from_json(r#"[{"id":"lamp","name":"Arc Lamp",
//!     "category":"Lighting","price":100,"image":"","description":"","colors":[]}]"#)?;
//! let mut engine = CartEngine::with_catalog(catalog);
//!
//! engine.add_to_cart(&ProductId::new("lamp"));
//! assert_eq!(engine.total().display(), "$115.00");
//!
//! let address = ShippingAddress::new("Ada", "Lovelace", "12 Analytical Way", "Portland", "OR", "97201");
//! let request = CheckoutRequest::from_engine(&engine, address, PaymentMethod::CreditCard)?;
//! println!("{}", request.to_variables()?);
//! engine.clear_cart();
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod reviews;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StorefrontConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::catalog::{Catalog, Product};

    pub use crate::cart::{
        Cart, CartEngine, CartTotals, FreeShippingMessage, Highlight, HighlightState, LineItem,
        Quantity,
    };

    pub use crate::reviews::{average_rating, Review, ReviewDraft, ReviewSummary};

    pub use crate::checkout::{
        CheckoutConfirmation, CheckoutItem, CheckoutRequest, CheckoutStatus, PaymentMethod,
        ShippingAddress,
    };
}
