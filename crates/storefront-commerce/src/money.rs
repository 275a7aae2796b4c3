//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so that cart totals are exact
//! sums. The GraphQL API and config files speak in decimal dollars; the
//! [`dollars`] serde adapter converts at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Currency of every amount the storefront handles. The API quotes prices
/// as bare US dollar figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    /// Currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
        }
    }

    /// Number of minor-unit digits.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Shorthand for a USD amount in cents.
    pub fn usd(amount_cents: i64) -> Self {
        Self::new(amount_cents, Currency::USD)
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// minor unit.
    ///
    /// ```
    /// use storefront_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_per_major() as f64
    }

    /// Format the way the storefront shows prices: `$1,250.00`, `-$5.00`.
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), self.display_amount())
    }

    /// Absolute amount with thousands separators and no symbol.
    pub fn display_amount(&self) -> String {
        let per_major = self.currency.minor_per_major().unsigned_abs();
        let cents = self.amount_cents.unsigned_abs();
        let whole = group_thousands(cents / per_major);
        format!(
            "{}.{:0width$}",
            whole,
            cents % per_major,
            width = self.currency.decimal_places() as usize
        )
    }

    /// Add another Money value, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Subtract another Money value, returning None on overflow.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        self.amount_cents
            .checked_sub(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply, clamping at the numeric bounds instead of overflowing.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }

    /// Multiply by a decimal factor (e.g., a tax rate), rounding to the
    /// nearest minor unit.
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        let amount = (self.amount_cents as f64 * factor).round() as i64;
        Money::new(amount, self.currency)
    }

    /// Sum an iterator of Money values, returning None on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics on overflow. Use `try_add` for fallible addition.
    fn add(self, other: Money) -> Money {
        self.try_add(&other)
            .expect("overflow in addition")
    }
}

impl Sub for Money {
    type Output = Money;

    /// # Panics
    /// Panics on overflow.
    fn sub(self, other: Money) -> Money {
        self.try_subtract(&other)
            .expect("overflow in subtraction")
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.saturating_multiply(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Serde adapter that reads and writes [`Money`] as a decimal amount in the
/// default currency, the shape used by the GraphQL API (`"price": 129.5`).
///
/// Negative and non-finite amounts are rejected on input.
pub mod dollars {
    use super::{Currency, Money};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(D::Error::custom(format!(
                "expected a non-negative amount, got {amount}"
            )));
        }
        Ok(Money::from_decimal(amount, Currency::default()))
    }
}
