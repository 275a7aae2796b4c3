//! Checkout module.
//!
//! Turns a cart snapshot plus form input into the payload for the
//! storefront API's `createCheckout` mutation.

mod address;
mod payment;
mod request;

pub use address::{ShippingAddress, DEFAULT_COUNTRY};
pub use payment::{CheckoutStatus, PaymentMethod};
pub use request::{CheckoutConfirmation, CheckoutItem, CheckoutRequest};
