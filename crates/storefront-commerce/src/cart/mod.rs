//! Shopping cart module.
//!
//! Contains the quantity map, derived pricing, the add-to-cart highlight
//! and the [`CartEngine`] that ties them to a catalog.

mod cart;
mod engine;
mod highlight;
mod pricing;

pub use cart::{Cart, Quantity};
pub use engine::CartEngine;
pub use highlight::{Highlight, HighlightState, Highlighter};
pub use pricing::{
    item_count, line_items, shipping_for, subtotal, CartTotals, FreeShippingMessage, LineItem,
};
