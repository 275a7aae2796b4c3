//! The cart's quantity map.

use indexmap::IndexMap;
use tracing::debug;

use crate::ids::ProductId;

/// Quantity as seen by updaters. Signed so an updater can step below zero;
/// anything `<= 0` removes the entry.
pub type Quantity = i64;

/// A mapping from product id to positive quantity, in insertion order.
///
/// A product that is removed and added again moves to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: IndexMap<ProductId, Quantity>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `updater` to the current quantity (0 when absent).
    ///
    /// A non-positive result removes the entry; removing an absent entry is
    /// a no-op. Returns the stored quantity afterwards (0 when removed).
    pub fn update_quantity<F>(&mut self, product_id: &ProductId, updater: F) -> Quantity
    where
        F: FnOnce(Quantity) -> Quantity,
    {
        let current = self.quantity(product_id.as_str());
        let next = updater(current);

        if next <= 0 {
            if self.entries.shift_remove(product_id).is_some() {
                debug!(product_id = %product_id, previous = current, "removed cart entry");
            }
            return 0;
        }

        match self.entries.get_mut(product_id) {
            Some(quantity) => *quantity = next,
            None => {
                self.entries.insert(product_id.clone(), next);
            }
        }
        debug!(product_id = %product_id, previous = current, quantity = next, "set cart quantity");
        next
    }

    /// Quantity for a product, 0 when it is not in the cart.
    pub fn quantity(&self, product_id: &str) -> Quantity {
        self.entries.get(product_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.entries.contains_key(product_id)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, Quantity)> {
        self.entries.iter().map(|(id, &quantity)| (id, quantity))
    }

    /// Number of distinct products, including ones hidden from derived views.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
