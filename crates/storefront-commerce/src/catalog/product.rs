//! Product records as served by the storefront's GraphQL `products` query.

use crate::ids::ProductId;
use crate::money::{dollars, Money};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category label (e.g., "Lighting").
    pub category: String,
    /// Unit price; never negative.
    #[serde(with = "dollars")]
    pub price: Money,
    /// Image URL.
    pub image: String,
    pub description: String,
    /// Merchandising badge such as "New" or "Bestseller".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// Available colors, in display order.
    #[serde(default)]
    pub colors: Vec<String>,
}

impl Product {
    /// Create a product with the required fields; the rest start empty.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            image: String::new(),
            description: String::new(),
            badge: None,
            featured: None,
            colors: Vec::new(),
        }
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// Add a color option, ignoring duplicates.
    pub fn add_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        if !self.colors.contains(&color) {
            self.colors.push(color);
        }
    }

    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// Price formatted for display (e.g., "$129.00").
    pub fn display_price(&self) -> String {
        self.price.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_graphql_json() {
        let json = r#"{
            "id": "p-1",
            "name": "Arc Floor Lamp",
            "category": "Lighting",
            "price": 129.5,
            "image": "https://cdn.example.com/arc.jpg",
            "description": "Brushed brass arc lamp.",
            "badge": "New",
            "featured": true,
            "colors": ["Brass", "Black"]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p-1");
        assert_eq!(product.price, Money::usd(12950));
        assert_eq!(product.badge.as_deref(), Some("New"));
        assert!(product.is_featured());
        assert_eq!(product.colors, vec!["Brass", "Black"]);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "id": "p-2",
            "name": "Linen Throw",
            "category": "Textiles",
            "price": 48,
            "image": "throw.jpg",
            "description": "Stonewashed linen.",
            "badge": null,
            "colors": []
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.badge, None);
        assert!(!product.is_featured());
        assert_eq!(product.display_price(), "$48.00");
    }

    #[test]
    fn test_add_color_dedupes() {
        let mut product = Product::new("p-3", "Mug", "Kitchen", Money::usd(1800));
        product.add_color("Sand");
        product.add_color("Sand");
        product.add_color("Clay");
        assert_eq!(product.colors, vec!["Sand", "Clay"]);
    }
}
