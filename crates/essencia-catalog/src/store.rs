//! In-memory catalog provider.
//!
//! A [`Catalog`] is immutable once built. Share it by reference or behind an
//! `Arc`; readers never need to coordinate.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Category, Product, Testimonial};
use crate::error::{CatalogError, Entity};
use crate::ids::ProductId;
use crate::loader::{CatalogLoader, LoadReport};
use crate::search::{ProductFilter, ProductQuery};

/// Read-only collections of categories, products and testimonials.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
    testimonials: Vec<Testimonial>,
    category_by_slug: HashMap<String, usize>,
    product_by_slug: HashMap<String, usize>,
    product_by_id: HashMap<ProductId, usize>,
    report: LoadReport,
}

impl Catalog {
    /// Load the bundled dataset with the strict policy.
    pub fn builtin() -> Result<Self, CatalogError> {
        CatalogLoader::new().load_builtin()
    }

    /// Assemble a catalog from records that already passed validation.
    pub(crate) fn from_parts(
        categories: Vec<Category>,
        products: Vec<Product>,
        testimonials: Vec<Testimonial>,
        report: LoadReport,
    ) -> Self {
        let category_by_slug = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.slug.clone(), i))
            .collect();
        let product_by_slug = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.slug.clone(), i))
            .collect();
        let product_by_id = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        Self {
            categories,
            products,
            testimonials,
            category_by_slug,
            product_by_slug,
            product_by_id,
            report,
        }
    }

    /// All categories in source order.
    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    /// All testimonials in source order.
    pub fn list_testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    /// Products matching `filter`, in source order.
    ///
    /// A category slug that names no category is an `InvalidFilter`, not an
    /// empty result.
    pub fn list_products(&self, filter: &ProductFilter) -> Result<Vec<&Product>, CatalogError> {
        if let Some(ref slug) = filter.category {
            if !self.category_by_slug.contains_key(slug) {
                return Err(CatalogError::InvalidFilter(format!(
                    "unknown category '{}'",
                    slug
                )));
            }
        }

        let products: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .collect();
        debug!(?filter, matched = products.len(), "listed products");
        Ok(products)
    }

    /// Products matching the query filter, ordered by the query sort and
    /// cut to the query limit.
    pub fn query_products(&self, query: &ProductQuery) -> Result<Vec<&Product>, CatalogError> {
        let mut products = self.list_products(&query.filter)?;
        query.sort.apply(&mut products);
        if let Some(limit) = query.limit {
            products.truncate(limit);
        }
        Ok(products)
    }

    /// Up to `limit` other products from the same category, in source order.
    pub fn related_products(
        &self,
        id: impl AsRef<str>,
        limit: usize,
    ) -> Result<Vec<&Product>, CatalogError> {
        let product = self.get_product(id)?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect())
    }

    /// Products of one category; `NotFound` if the category does not exist.
    pub fn products_in_category(&self, slug: &str) -> Result<Vec<&Product>, CatalogError> {
        let category = self.get_category_by_slug(slug)?;
        Ok(self
            .products
            .iter()
            .filter(|p| category.has_slug(&p.category))
            .collect())
    }

    pub fn get_product_by_slug(&self, slug: &str) -> Result<&Product, CatalogError> {
        self.product_by_slug
            .get(slug)
            .map(|&i| &self.products[i])
            .ok_or_else(|| CatalogError::not_found(Entity::Product, slug))
    }

    /// Look a product up by its identifier.
    pub fn get_product(&self, id: impl AsRef<str>) -> Result<&Product, CatalogError> {
        let id = id.as_ref();
        self.product_by_id
            .get(id)
            .map(|&i| &self.products[i])
            .ok_or_else(|| CatalogError::not_found(Entity::Product, id))
    }

    pub fn get_category_by_slug(&self, slug: &str) -> Result<&Category, CatalogError> {
        self.category_by_slug
            .get(slug)
            .map(|&i| &self.categories[i])
            .ok_or_else(|| CatalogError::not_found(Entity::Category, slug))
    }

    /// Violations dropped while loading (empty under the strict policy).
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Summary counts of the dataset.
    pub fn stats(&self) -> CatalogStats {
        let mut per_category: Vec<CategoryCount> = self
            .categories
            .iter()
            .map(|c| CategoryCount {
                slug: c.slug.clone(),
                name: c.name.clone(),
                products: 0,
            })
            .collect();
        for product in &self.products {
            if let Some(&i) = self.category_by_slug.get(&product.category) {
                per_category[i].products += 1;
            }
        }

        CatalogStats {
            categories: self.categories.len(),
            products: self.products.len(),
            featured: self.products.iter().filter(|p| p.featured).count(),
            in_stock: self.products.iter().filter(|p| p.in_stock).count(),
            testimonials: self.testimonials.len(),
            per_category,
        }
    }
}

/// Product count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub slug: String,
    pub name: String,
    pub products: usize,
}

/// Dataset summary returned by [`Catalog::stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub categories: usize,
    pub products: usize,
    pub featured: usize,
    pub in_stock: usize,
    pub testimonials: usize,
    /// Counts in category order, including empty categories.
    pub per_category: Vec<CategoryCount>,
}
