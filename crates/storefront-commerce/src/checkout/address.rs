//! Shipping address collected at checkout.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COUNTRY: &str = "United States";

/// A postal address as entered in the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    /// Street address.
    pub address: String,
    pub city: String,
    /// State/province.
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Default for ShippingAddress {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl ShippingAddress {
    /// Create an address in the default country.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            city: city.into(),
            state: state.into(),
            zip_code: zip_code.into(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.address, self.city, self.state, self.zip_code, self.country
        )
    }

    /// Every field is required; report the first blank one.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let fields = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
            ("country", &self.country),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(CommerceError::MissingField(*name)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ShippingAddress {
        ShippingAddress::new("Ada", "Lovelace", "12 Analytical Way", "Portland", "OR", "97201")
    }

    #[test]
    fn test_defaults_to_united_states() {
        assert_eq!(address().country, "United States");
        assert_eq!(ShippingAddress::default().country, "United States");
    }

    #[test]
    fn test_formatting() {
        let address = address();
        assert_eq!(address.full_name(), "Ada Lovelace");
        assert_eq!(
            address.one_line(),
            "12 Analytical Way, Portland, OR 97201, United States"
        );
    }

    #[test]
    fn test_validate_reports_first_blank_field() {
        assert!(address().validate().is_ok());

        let mut missing_city = address();
        missing_city.city = "   ".to_string();
        assert!(matches!(
            missing_city.validate(),
            Err(CommerceError::MissingField("city"))
        ));

        assert!(matches!(
            ShippingAddress::default().validate(),
            Err(CommerceError::MissingField("firstName"))
        ));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(address()).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["zipCode"], "97201");
    }
}
