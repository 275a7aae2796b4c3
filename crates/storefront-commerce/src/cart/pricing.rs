//! Cart pricing calculations.
//!
//! Everything here is a pure function of the cart, the catalog and the
//! config; the engine recomputes on every read instead of caching.

use std::fmt;

use serde::Serialize;

use crate::cart::{Cart, Quantity};
use crate::catalog::{Catalog, Product};
use crate::config::StorefrontConfig;
use crate::money::{dollars, Money};

/// A product paired with its cart quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineItem<'a> {
    pub product: &'a Product,
    pub quantity: Quantity,
}

impl LineItem<'_> {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.saturating_multiply(self.quantity)
    }
}

/// Resolve cart entries against the catalog, in cart order. Entries whose
/// product is missing are skipped, not removed from the cart.
pub fn line_items<'a>(cart: &Cart, catalog: &'a Catalog) -> Vec<LineItem<'a>> {
    cart.iter()
        .filter_map(|(id, quantity)| {
            catalog
                .get(id.as_str())
                .map(|product| LineItem { product, quantity })
        })
        .collect()
}

/// Sum of quantities, clamped at `Quantity::MAX`.
pub fn item_count(items: &[LineItem<'_>]) -> Quantity {
    items
        .iter()
        .fold(0, |acc: Quantity, item| acc.saturating_add(item.quantity))
}

/// Sum of `price * quantity`.
pub fn subtotal(items: &[LineItem<'_>], config: &StorefrontConfig) -> Money {
    let currency = config.free_shipping_threshold.currency;
    items.iter().fold(Money::zero(currency), |acc, item| {
        Money::new(
            acc.amount_cents.saturating_add(item.line_total().amount_cents),
            currency,
        )
    })
}

/// Free for an empty cart or at/above the threshold, flat rate otherwise.
pub fn shipping_for(subtotal: Money, config: &StorefrontConfig) -> Money {
    if subtotal.is_zero()
        || subtotal.amount_cents >= config.free_shipping_threshold.amount_cents
    {
        Money::zero(config.flat_shipping_rate.currency)
    } else {
        config.flat_shipping_rate
    }
}

/// Copy shown next to the cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FreeShippingMessage {
    /// Nothing in the cart yet.
    EmptyCart,
    /// The order already ships free.
    Unlocked,
    /// The shopper needs to spend this much more.
    SpendMore {
        #[serde(with = "dollars")]
        remaining: Money,
    },
}

impl FreeShippingMessage {
    pub fn new(subtotal: Money, shipping: Money, config: &StorefrontConfig) -> Self {
        if subtotal.is_zero() {
            FreeShippingMessage::EmptyCart
        } else if shipping.is_zero() {
            FreeShippingMessage::Unlocked
        } else {
            FreeShippingMessage::SpendMore {
                remaining: Money::new(
                    config
                        .free_shipping_threshold
                        .amount_cents
                        .saturating_sub(subtotal.amount_cents),
                    subtotal.currency,
                ),
            }
        }
    }
}

impl fmt::Display for FreeShippingMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreeShippingMessage::EmptyCart => {
                f.write_str("Start building your bag to unlock complimentary delivery.")
            }
            FreeShippingMessage::Unlocked => f.write_str("Shipping is on us today."),
            FreeShippingMessage::SpendMore { remaining } => {
                write!(f, "Add {} more for free express delivery.", remaining)
            }
        }
    }
}

/// Snapshot of every derived cart figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub item_count: Quantity,
    #[serde(with = "dollars")]
    pub subtotal: Money,
    #[serde(with = "dollars")]
    pub shipping: Money,
    #[serde(with = "dollars")]
    pub total: Money,
    pub free_shipping_message: FreeShippingMessage,
}

impl CartTotals {
    pub fn compute(items: &[LineItem<'_>], config: &StorefrontConfig) -> Self {
        let subtotal = subtotal(items, config);
        let shipping = shipping_for(subtotal, config);
        Self {
            item_count: item_count(items),
            subtotal,
            shipping,
            total: Money::new(
                subtotal.amount_cents.saturating_add(shipping.amount_cents),
                subtotal.currency,
            ),
            free_shipping_message: FreeShippingMessage::new(subtotal, shipping, config),
        }
    }

    /// "Complimentary" when shipping is free, the amount otherwise.
    pub fn shipping_label(&self) -> String {
        if self.shipping.is_zero() {
            "Complimentary".to_string()
        } else {
            self.shipping.display()
        }
    }
}
