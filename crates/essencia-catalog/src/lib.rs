//! Read-only product catalog for the Essência Artesanal storefront.
//!
//! This crate serves the storefront's reference data:
//!
//! - **Catalog**: Categories, products and customer testimonials
//! - **Search**: Listing filters (category, featured, stock, name) and sorting
//! - **Loader**: Eager validation of a dataset into an immutable [`Catalog`]
//!
//! # Example
//!
//! ```rust,ignore
//! use essencia_catalog::prelude::*;
//!
//! let catalog = Catalog::builtin()?;
//!
//! let earrings = catalog.list_products(&ProductFilter::new().with_category("brincos"))?;
//! let product = catalog.get_product_by_slug("brincos-perola-dourados")?;
//! println!("{}: {}", product.name, product.price);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod loader;
pub mod search;
pub mod seed;
pub mod store;

pub use error::{CatalogError, Entity, Violation};
pub use ids::*;
pub use loader::{CatalogDocument, CatalogLoader, LoadPolicy, LoadReport};
pub use money::{Currency, Money};
pub use store::{Catalog, CatalogStats, CategoryCount};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, Entity, Violation};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product, Testimonial};

    // Search
    pub use crate::search::{ProductFilter, ProductQuery, SortOption};

    // Loading
    pub use crate::loader::{CatalogLoader, LoadPolicy, LoadReport};
    pub use crate::store::{Catalog, CatalogStats};
}
