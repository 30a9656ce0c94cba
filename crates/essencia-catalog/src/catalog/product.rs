//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Slug of the category this product belongs to.
    pub category: String,
    /// Unit price.
    pub price: Money,
    /// Image URLs, primary image first.
    pub images: Vec<String>,
    /// Product description.
    pub description: String,
    /// Whether the product can currently be ordered.
    pub in_stock: bool,
    /// Whether the product is highlighted on the storefront.
    pub featured: bool,
}

impl Product {
    /// Create a new in-stock, non-featured product with no images.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        slug: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            category: category.into(),
            price,
            images: Vec::new(),
            description: String::new(),
            in_stock: true,
            featured: false,
        }
    }

    /// Append an image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Mark the product as featured.
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Mark the product as out of stock.
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Case-insensitive substring match on the product name.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn earrings() -> Product {
        Product::new(
            "1",
            "Brincos de Pérola Dourados",
            "brincos-perola-dourados",
            "brincos",
            Money::new(4590, Currency::AOA),
        )
    }

    #[test]
    fn test_product_creation() {
        let product = earrings();
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.price.amount_cents, 4590);
        assert!(product.in_stock);
        assert!(!product.featured);
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_product_builders() {
        let product = earrings()
            .with_image("https://img/a.jpg")
            .with_image("https://img/b.jpg")
            .featured()
            .out_of_stock();

        assert_eq!(product.images[0], "https://img/a.jpg");
        assert_eq!(product.images.len(), 2);
        assert!(product.featured);
        assert!(!product.in_stock);
    }

    #[test]
    fn test_name_contains_ignores_case() {
        let product = earrings();
        assert!(product.name_contains("pérola"));
        assert!(product.name_contains("brincos"));
        assert!(!product.name_contains("colar"));
    }
}
