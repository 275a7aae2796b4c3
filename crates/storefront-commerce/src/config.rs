//! Storefront pricing and cart configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::{dollars, Money};

/// Default subtotal at which shipping becomes free ($150.00).
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Money = Money {
    amount_cents: 15_000,
    currency: crate::money::Currency::USD,
};

/// Default flat shipping rate below the threshold ($15.00).
pub const DEFAULT_FLAT_SHIPPING_RATE: Money = Money {
    amount_cents: 1_500,
    currency: crate::money::Currency::USD,
};

pub const DEFAULT_TAX_RATE: f64 = 0.08;

pub const DEFAULT_HIGHLIGHT_DURATION_MS: u64 = 1_200;

/// Configuration shared by the cart engine and checkout builder.
///
/// Every field falls back to its default, so a config file only needs the
/// values it overrides:
///
/// ```toml
/// free_shipping_threshold = 200.0
/// highlight_duration_ms = 800
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Subtotal at or above which shipping is waived.
    #[serde(with = "dollars")]
    pub free_shipping_threshold: Money,

    /// Shipping charged on non-empty carts below the threshold.
    #[serde(with = "dollars")]
    pub flat_shipping_rate: Money,

    /// Sales tax applied to the subtotal at checkout (0.08 = 8%).
    pub tax_rate: f64,

    /// How long an "added to cart" highlight stays up.
    pub highlight_duration_ms: u64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
            flat_shipping_rate: DEFAULT_FLAT_SHIPPING_RATE,
            tax_rate: DEFAULT_TAX_RATE,
            highlight_duration_ms: DEFAULT_HIGHLIGHT_DURATION_MS,
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        };
        config.with_context(|| format!("Failed to load config: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CommerceError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values make sense together.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(CommerceError::InvalidConfig(format!(
                "tax_rate must be between 0 and 1, got {}",
                self.tax_rate
            )));
        }
        if self.highlight_duration_ms == 0 {
            return Err(CommerceError::InvalidConfig(
                "highlight_duration_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_duration_ms)
    }
}
