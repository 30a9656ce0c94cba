//! Product query: a filter plus an ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::error::CatalogError;
use crate::search::ProductFilter;
use serde::{Deserialize, Serialize};

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Relevance,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Relevance,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name",
        }
    }

    /// Label shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Relevance",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
        }
    }

    /// Order products in place. The sort is stable, so ties keep catalog order.
    pub fn apply(&self, products: &mut [&Product]) {
        match self {
            SortOption::Relevance => {}
            SortOption::PriceAsc => products.sort_by(|a, b| compare_price(a, b)),
            SortOption::PriceDesc => products.sort_by(|a, b| compare_price(b, a)),
            SortOption::NameAsc => {
                products.sort_by_cached_key(|p| p.name.to_lowercase());
            }
        }
    }
}

fn compare_price(a: &Product, b: &Product) -> Ordering {
    a.price
        .try_cmp(&b.price)
        .unwrap_or_else(|| a.price.amount_cents.cmp(&b.price.amount_cents))
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "relevance" => Ok(SortOption::Relevance),
            "price-asc" | "price_asc" => Ok(SortOption::PriceAsc),
            "price-desc" | "price_desc" => Ok(SortOption::PriceDesc),
            "name" | "name-asc" | "name_asc" => Ok(SortOption::NameAsc),
            other => Err(CatalogError::InvalidFilter(format!(
                "unknown sort option '{}'",
                other
            ))),
        }
    }
}

/// A product query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Filter to apply.
    #[serde(default)]
    pub filter: ProductFilter,
    /// Sort option.
    #[serde(default)]
    pub sort: SortOption,
    /// Keep at most this many products, counted after sorting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter.
    pub fn with_filter(mut self, filter: ProductFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
