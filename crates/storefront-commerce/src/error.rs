//! Commerce error types.
//!
//! Cart mutations never fail; these errors come from the edges: parsing
//! catalog and config input, validating review drafts, and building the
//! checkout payload.

use thiserror::Error;

/// Errors that can occur at the storefront's input/output boundaries.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout was requested with no purchasable line items.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// A required form field was blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A value was present but out of range.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
