//! The `createCheckout` mutation payload.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::{CartEngine, LineItem, Quantity};
use crate::checkout::{CheckoutStatus, PaymentMethod, ShippingAddress};
use crate::config::StorefrontConfig;
use crate::error::CommerceError;
use crate::ids::{CheckoutId, ProductId};
use crate::money::{dollars, Money};

/// One purchased product, priced at the time of checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: Quantity,
    /// Unit price.
    #[serde(with = "dollars")]
    pub price: Money,
}

impl From<&LineItem<'_>> for CheckoutItem {
    fn from(item: &LineItem<'_>) -> Self {
        Self {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            quantity: item.quantity,
            price: item.product.price,
        }
    }
}

/// Everything the API needs to create a checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    #[serde(with = "dollars")]
    pub subtotal: Money,
    #[serde(with = "dollars")]
    pub shipping: Money,
    #[serde(with = "dollars")]
    pub tax: Money,
    /// `subtotal + shipping + tax`.
    #[serde(with = "dollars")]
    pub total: Money,
}

impl CheckoutRequest {
    /// Build a request from line items.
    ///
    /// Fails on an empty item list or a blank address field. Tax is the
    /// configured rate applied to the subtotal, rounded to the cent.
    pub fn from_line_items(
        items: &[LineItem<'_>],
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
        config: &StorefrontConfig,
    ) -> Result<Self, CommerceError> {
        if items.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        shipping_address.validate()?;

        let items: Vec<CheckoutItem> = items.iter().map(CheckoutItem::from).collect();
        let subtotal = items
            .iter()
            .try_fold(Money::zero(config.flat_shipping_rate.currency), |acc, item| {
                item.price
                    .try_multiply(item.quantity)
                    .and_then(|line| acc.try_add(&line))
            })
            .ok_or(CommerceError::Overflow)?;
        let shipping = crate::cart::shipping_for(subtotal, config);
        let tax = subtotal.multiply_decimal(config.tax_rate);
        let total = subtotal
            .try_add(&shipping)
            .and_then(|sum| sum.try_add(&tax))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            items,
            shipping_address,
            payment_method,
            subtotal,
            shipping,
            tax,
            total,
        })
    }

    /// Build a request from the engine's current cart.
    pub fn from_engine(
        engine: &CartEngine,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Self, CommerceError> {
        let request = Self::from_line_items(
            &engine.cart_items(),
            shipping_address,
            payment_method,
            engine.config(),
        )?;
        info!(
            items = request.items.len(),
            total = %request.total,
            payment_method = request.payment_method.as_str(),
            "built checkout request"
        );
        Ok(request)
    }

    /// GraphQL variables for the `createCheckout` mutation.
    pub fn to_variables(&self) -> Result<serde_json::Value, CommerceError> {
        Ok(serde_json::json!({ "createCheckoutInput": serde_json::to_value(self)? }))
    }

    pub fn item_count(&self) -> Quantity {
        self.items
            .iter()
            .fold(0, |acc: Quantity, item| acc.saturating_add(item.quantity))
    }
}

/// The API's answer to `createCheckout`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfirmation {
    pub id: CheckoutId,
    pub status: CheckoutStatus,
    #[serde(with = "dollars")]
    pub total: Money,
}

impl CheckoutConfirmation {
    /// Parse the `data` object of a `createCheckout` response.
    pub fn from_response(data: &serde_json::Value) -> Result<Self, CommerceError> {
        let payload = data.get("createCheckout").ok_or_else(|| {
            CommerceError::SerializationError("response has no createCheckout field".to_string())
        })?;
        Ok(Self::deserialize(payload)?)
    }
}
