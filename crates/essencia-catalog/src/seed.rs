//! Built-in storefront dataset.

/// The bundled catalog: 10 categories, 34 products and 3 testimonials.
pub const BUILTIN_JSON: &str = include_str!("../data/catalog.json");
