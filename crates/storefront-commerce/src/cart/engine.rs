//! Session-scoped cart engine.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::cart::highlight::{HighlightState, Highlighter};
use crate::cart::pricing::{self, CartTotals, FreeShippingMessage, LineItem};
use crate::cart::{Cart, Quantity};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::ids::ProductId;
use crate::money::Money;

/// Owns one shopper's cart for the length of a session.
///
/// Construct one per session and hand it to whatever needs it; dropping it
/// ends the session and cancels any pending highlight timer.
///
/// Entries whose product disappears from the catalog are kept in the cart
/// but hidden from every derived figure. They come back if a later catalog
/// snapshot contains the product again.
#[derive(Debug)]
pub struct CartEngine {
    catalog: Arc<Catalog>,
    config: StorefrontConfig,
    cart: Cart,
    is_cart_open: bool,
    highlighter: Highlighter,
}

impl CartEngine {
    pub fn new(catalog: impl Into<Arc<Catalog>>, config: StorefrontConfig) -> Self {
        let highlighter = Highlighter::new(config.highlight_duration());
        Self {
            catalog: catalog.into(),
            config,
            cart: Cart::new(),
            is_cart_open: false,
            highlighter,
        }
    }

    /// Engine with the default storefront config.
    pub fn with_catalog(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self::new(catalog, StorefrontConfig::default())
    }

    /// Run highlight timers on `runtime`. Without one, the engine uses the
    /// runtime it was built on or the caller's.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.highlighter = self.highlighter.with_runtime(runtime);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Swap in a fresh catalog snapshot.
    pub fn set_catalog(&mut self, catalog: impl Into<Arc<Catalog>>) {
        self.catalog = catalog.into();
        let hidden = self
            .cart
            .iter()
            .filter(|(id, _)| !self.catalog.contains(id.as_str()))
            .count();
        if hidden > 0 {
            warn!(hidden, "cart entries hidden: products missing from catalog");
        }
    }

    /// Apply `updater` to the product's quantity (0 when absent). A result
    /// `<= 0` removes the product from the cart.
    pub fn update_quantity<F>(&mut self, product_id: &ProductId, updater: F)
    where
        F: FnOnce(Quantity) -> Quantity,
    {
        self.cart.update_quantity(product_id, updater);
    }

    /// Add one unit and highlight the product. Returns the highlight token.
    ///
    /// Outside any Tokio runtime the highlight is published without a clear
    /// timer.
    pub fn add_to_cart(&mut self, product_id: &ProductId) -> u64 {
        self.update_quantity(product_id, |current| current.saturating_add(1));
        self.highlighter.trigger(product_id.clone())
    }

    pub fn toggle_cart(&mut self) {
        self.is_cart_open = !self.is_cart_open;
        debug!(open = self.is_cart_open, "toggled cart");
    }

    pub fn is_cart_open(&self) -> bool {
        self.is_cart_open
    }

    /// Empty the cart, e.g. after a successful checkout.
    pub fn clear_cart(&mut self) {
        if !self.cart.is_empty() {
            info!(entries = self.cart.len(), "clearing cart");
        }
        self.cart.clear();
    }

    /// Raw quantity stored for a product, including hidden entries.
    pub fn quantity(&self, product_id: &str) -> Quantity {
        self.cart.quantity(product_id)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Line items for products present in the current catalog, in the
    /// order they were first added.
    pub fn cart_items(&self) -> Vec<LineItem<'_>> {
        pricing::line_items(&self.cart, &self.catalog)
    }

    pub fn cart_count(&self) -> Quantity {
        pricing::item_count(&self.cart_items())
    }

    pub fn subtotal(&self) -> Money {
        pricing::subtotal(&self.cart_items(), &self.config)
    }

    pub fn shipping(&self) -> Money {
        pricing::shipping_for(self.subtotal(), &self.config)
    }

    pub fn total(&self) -> Money {
        self.totals().total
    }

    pub fn free_shipping_message(&self) -> FreeShippingMessage {
        self.totals().free_shipping_message
    }

    /// Every derived figure computed from one pass over the line items.
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.cart_items(), &self.config)
    }

    pub fn highlight(&self) -> HighlightState {
        self.highlighter.state()
    }

    pub fn subscribe_highlight(&self) -> watch::Receiver<HighlightState> {
        self.highlighter.subscribe()
    }

    pub fn is_highlighted(&self, product_id: &str) -> bool {
        self.highlighter.is_highlighted(product_id)
    }
}
