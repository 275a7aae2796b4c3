//! Product catalog module.
//!
//! The catalog is a read-only snapshot supplied by the GraphQL collaborator.
//! It keeps the API's ordering for listings and an id index for cart lookups.

mod product;

pub use product::Product;

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::CommerceError;
use crate::ids::ProductId;

/// An ordered, id-indexed set of products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

/// Shape of the GraphQL `products` query result.
#[derive(Debug, Deserialize)]
struct ProductsQueryResult {
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Query(ProductsQueryResult),
    List(Vec<Product>),
}

impl Catalog {
    /// Build a catalog. When two products share an id, lookups resolve to
    /// the later one.
    pub fn new(products: Vec<Product>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id.clone(), position))
            .collect();
        Self { products, index }
    }

    /// Parse either a bare product array or a `{"products": [...]}` query
    /// result.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products = match serde_json::from_str(json)? {
            CatalogPayload::Query(result) => result.products,
            CatalogPayload::List(products) => products,
        };
        Ok(Self::new(products))
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&position| &self.products[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Products in API order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_featured())
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Distinct category labels in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn sample() -> Catalog {
        Catalog::new(vec![
            Product::new("lamp", "Arc Lamp", "Lighting", Money::usd(12900)).with_featured(true),
            Product::new("sconce", "Wall Sconce", "Lighting", Money::usd(8900)),
            Product::new("throw", "Linen Throw", "Textiles", Money::usd(4800)),
        ])
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = sample();
        assert_eq!(catalog.get("sconce").map(|p| p.name.as_str()), Some("Wall Sconce"));
        assert!(catalog.get("missing").is_none());
        assert!(catalog.contains("lamp"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_duplicate_ids_resolve_to_last() {
        let catalog = Catalog::new(vec![
            Product::new("dup", "Old", "A", Money::usd(100)),
            Product::new("dup", "New", "A", Money::usd(200)),
        ]);
        assert_eq!(catalog.get("dup").map(|p| p.name.as_str()), Some("New"));
    }

    #[test]
    fn test_filters() {
        let catalog = sample();
        assert_eq!(catalog.featured().count(), 1);
        assert_eq!(catalog.in_category("Lighting").count(), 2);
        assert_eq!(catalog.categories(), vec!["Lighting", "Textiles"]);
    }

    #[test]
    fn test_from_json_accepts_both_shapes() {
        let item = r#"{"id":"a","name":"A","category":"C","price":100,"image":"","description":"","colors":[]}"#;

        let list = Catalog::from_json(&format!("[{item}]")).unwrap();
        let query = Catalog::from_json(&format!(r#"{{"products":[{item}]}}"#)).unwrap();

        assert_eq!(list, query);
        assert_eq!(list.get("a").map(|p| p.price), Some(Money::usd(10_000)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Catalog::from_json("{\"items\": 3}").is_err());
    }
}
