//! Search module.
//!
//! Contains the filter and sort types used by product listings.

mod filter;
mod query;

pub use filter::ProductFilter;
pub use query::{ProductQuery, SortOption};
