//! Review records and the draft a shopper submits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId};

/// Highest star rating.
pub const MAX_RATING: u8 = 5;

/// A review as returned by the `reviews(productId)` query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    /// Name the reviewer typed, if any.
    #[serde(default)]
    pub name: Option<String>,
    pub text: String,
    /// Star rating. Zero or negative means "not rated".
    pub rating: i32,
    /// Account name of the author.
    #[serde(default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn new(
        id: impl Into<ReviewId>,
        product_id: impl Into<ProductId>,
        text: impl Into<String>,
        rating: i32,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            name: None,
            text: text.into(),
            rating,
            user_name: String::new(),
            created_at: None,
        }
    }

    /// Typed name, falling back to the account name.
    pub fn author(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.user_name)
    }

    pub fn is_rated(&self) -> bool {
        self.rating > 0
    }

    /// Render the rating as five filled/empty stars.
    pub fn render_stars(&self) -> String {
        let filled = self.rating.clamp(0, MAX_RATING as i32) as usize;
        let empty = MAX_RATING as usize - filled;
        format!("{}{}", "\u{2605}".repeat(filled), "\u{2606}".repeat(empty))
    }
}

/// Review form input, before it is sent as `CreateReviewInput`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub product_id: ProductId,
    pub name: String,
    pub text: String,
    pub rating: u8,
}

impl ReviewDraft {
    /// Trim the text fields and check the draft is complete.
    pub fn validate(self) -> Result<Self, CommerceError> {
        let name = self.name.trim().to_string();
        let text = self.text.trim().to_string();

        if name.is_empty() {
            return Err(CommerceError::ValidationError(
                "Please enter your name".to_string(),
            ));
        }
        if text.is_empty() {
            return Err(CommerceError::ValidationError(
                "Please enter your review".to_string(),
            ));
        }
        if self.rating == 0 {
            return Err(CommerceError::ValidationError(
                "Please select a rating".to_string(),
            ));
        }
        if self.rating > MAX_RATING {
            return Err(CommerceError::ValidationError(format!(
                "Rating must be between 1 and {MAX_RATING}, got {}",
                self.rating
            )));
        }

        Ok(Self {
            product_id: self.product_id,
            name,
            text,
            rating: self.rating,
        })
    }
}
