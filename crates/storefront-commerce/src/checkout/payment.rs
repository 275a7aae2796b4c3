//! Payment methods and checkout status.

use serde::{Deserialize, Serialize};

/// Payment method offered at checkout. Serialized in the API's
/// `SCREAMING_SNAKE_CASE` form (`"CREDIT_CARD"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    DebitCard,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Paypal,
        PaymentMethod::BankTransfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Paypal => "PAYPAL",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.as_str() == s)
    }
}

/// Status the API reports for a checkout. Order endpoints send the same
/// values upper-cased, so both spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStatus {
    #[default]
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "PROCESSING")]
    Processing,
    #[serde(alias = "COMPLETED")]
    Completed,
    #[serde(alias = "FAILED")]
    Failed,
    #[serde(alias = "CANCELLED")]
    Cancelled,
}

impl CheckoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Pending => "pending",
            CheckoutStatus::Processing => "processing",
            CheckoutStatus::Completed => "completed",
            CheckoutStatus::Failed => "failed",
            CheckoutStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStatus::Pending => "Pending",
            CheckoutStatus::Processing => "Processing",
            CheckoutStatus::Completed => "Completed",
            CheckoutStatus::Failed => "Failed",
            CheckoutStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if the checkout can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutStatus::Completed | CheckoutStatus::Failed | CheckoutStatus::Cancelled
        )
    }

    /// Check if the shopper may still cancel.
    pub fn can_cancel(&self) -> bool {
        matches!(self, CheckoutStatus::Pending | CheckoutStatus::Processing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_names() {
        for method in PaymentMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
            assert_eq!(PaymentMethod::from_str(method.as_str()), Some(method));
        }
        assert_eq!(PaymentMethod::from_str("CASH"), None);
        assert_eq!(PaymentMethod::default(), PaymentMethod::CreditCard);
    }

    #[test]
    fn test_checkout_status() {
        let status: CheckoutStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(status, CheckoutStatus::Processing);
        assert!(status.can_cancel());
        assert!(!status.is_terminal());
        assert!(CheckoutStatus::Completed.is_terminal());
        assert_eq!(CheckoutStatus::Cancelled.display_name(), "Cancelled");
    }

    #[test]
    fn test_checkout_status_accepts_upper_case() {
        let status: CheckoutStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(status, CheckoutStatus::Pending);
        let status: CheckoutStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, CheckoutStatus::Cancelled);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"cancelled\"");
        assert!(serde_json::from_str::<CheckoutStatus>("\"Shipped\"").is_err());
    }
}
