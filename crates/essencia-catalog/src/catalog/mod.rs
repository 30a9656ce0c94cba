//! Catalog entity types.
//!
//! Contains the three kinds of reference data the storefront reads:
//! categories, products and testimonials.

mod category;
mod product;
mod testimonial;

pub use category::Category;
pub use product::Product;
pub use testimonial::{Testimonial, MAX_RATING, MIN_RATING};
