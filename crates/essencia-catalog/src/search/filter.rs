//! Product listing filters.

use crate::catalog::Product;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Criteria narrowing a product listing.
///
/// Every field is optional; set fields combine with logical AND. The
/// default filter matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Category slug the product must belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Required value of the featured flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// Required value of the stock flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    /// Case-insensitive substring of the product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ProductFilter {
    /// Create a filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category slug.
    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    /// Restrict to featured (or non-featured) products.
    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// Restrict to in-stock (or out-of-stock) products.
    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    /// Restrict to products whose name contains `text`. Blank text is ignored.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Check whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.featured.is_none()
            && self.in_stock.is_none()
            && self.search.is_none()
    }

    /// Check whether a product satisfies every set criterion.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(ref category) = self.category {
            if product.category != *category {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if product.featured != featured {
                return false;
            }
        }
        if let Some(in_stock) = self.in_stock {
            if product.in_stock != in_stock {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            if !product.name_contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Build a filter from untyped key/value parameters.
    ///
    /// Recognized keys are `category`, `featured`, `in_stock` and `search`
    /// (alias `q`). Unknown keys, repeated keys, empty categories and
    /// unparseable booleans are rejected.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        let mut seen_search = false;

        for (key, value) in pairs {
            let key = key.as_ref().trim();
            let value = value.as_ref().trim();
            match key {
                "category" => {
                    if filter.category.is_some() {
                        return Err(repeated(key));
                    }
                    if value.is_empty() {
                        return Err(CatalogError::InvalidFilter(
                            "category must not be empty".to_string(),
                        ));
                    }
                    filter.category = Some(value.to_string());
                }
                "featured" => {
                    if filter.featured.is_some() {
                        return Err(repeated(key));
                    }
                    filter.featured = Some(parse_bool(key, value)?);
                }
                "in_stock" | "inStock" => {
                    if filter.in_stock.is_some() {
                        return Err(repeated("in_stock"));
                    }
                    filter.in_stock = Some(parse_bool("in_stock", value)?);
                }
                "search" | "q" => {
                    if seen_search {
                        return Err(repeated("search"));
                    }
                    seen_search = true;
                    filter = filter.with_search(value);
                }
                other => {
                    return Err(CatalogError::InvalidFilter(format!(
                        "unrecognized filter key '{}'",
                        other
                    )));
                }
            }
        }

        Ok(filter)
    }
}

fn repeated(key: &str) -> CatalogError {
    CatalogError::InvalidFilter(format!("filter key '{}' given more than once", key))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, CatalogError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CatalogError::InvalidFilter(format!(
            "{} expects a boolean, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(category: &str, featured: bool, in_stock: bool) -> Product {
        let mut p = Product::new(
            "1",
            "Colar Turquesa Artesanal",
            "colar-turquesa-artesanal",
            category,
            Money::new(7200, Currency::BRL),
        );
        p.featured = featured;
        p.in_stock = in_stock;
        p
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ProductFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&product("colares", false, false)));
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let filter = ProductFilter::new()
            .with_category("colares")
            .with_featured(true);

        assert!(filter.matches(&product("colares", true, true)));
        assert!(!filter.matches(&product("colares", false, true)));
        assert!(!filter.matches(&product("brincos", true, true)));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filter = ProductFilter::new().with_search("TURQUESA");
        assert!(filter.matches(&product("colares", false, true)));

        let filter = ProductFilter::new().with_search("pulseira");
        assert!(!filter.matches(&product("colares", false, true)));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        assert!(ProductFilter::new().with_search("   ").is_empty());
    }

    #[test]
    fn test_from_pairs() {
        let filter =
            ProductFilter::from_pairs([("category", "brincos"), ("featured", "true")]).unwrap();
        assert_eq!(filter.category.as_deref(), Some("brincos"));
        assert_eq!(filter.featured, Some(true));
        assert_eq!(filter.in_stock, None);

        let filter = ProductFilter::from_pairs([("q", "scrunchie"), ("inStock", "0")]).unwrap();
        assert_eq!(filter.search.as_deref(), Some("scrunchie"));
        assert_eq!(filter.in_stock, Some(false));
    }

    #[test]
    fn test_from_pairs_rejects_unknown_key() {
        let err = ProductFilter::from_pairs([("color", "azul")]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFilter(_)));
        assert!(err.to_string().contains("color"));
    }

    #[test]
    fn test_from_pairs_rejects_bad_values() {
        assert!(ProductFilter::from_pairs([("featured", "maybe")]).is_err());
        assert!(ProductFilter::from_pairs([("category", " ")]).is_err());
        assert!(ProductFilter::from_pairs([("featured", "true"), ("featured", "false")]).is_err());
    }
}
