//! Catalog error types.

use std::fmt;

use thiserror::Error;

/// Kind of catalog entity, used to label lookups and violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Category,
    Product,
    Testimonial,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Category => "category",
            Entity::Product => "product",
            Entity::Testimonial => "testimonial",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A broken data invariant found while loading a catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    /// Product references a category slug that does not exist.
    #[error("product {product} references unknown category '{category}'")]
    DanglingCategory { product: String, category: String },

    /// Two records of the same kind share an identifier.
    #[error("duplicate {entity} id '{id}'")]
    DuplicateId { entity: Entity, id: String },

    /// Two records of the same kind share a slug.
    #[error("duplicate {entity} slug '{slug}'")]
    DuplicateSlug { entity: Entity, slug: String },

    /// Product price is negative.
    #[error("product {product} has negative price {price}")]
    NegativePrice { product: String, price: f64 },

    /// Product price is not finite or too large to store in minor units.
    #[error("product {product} has unrepresentable price {price}")]
    PriceOutOfRange { product: String, price: f64 },

    /// Product has an empty image list.
    #[error("product {product} has no images")]
    MissingImages { product: String },

    /// Testimonial rating outside 1..=5.
    #[error("testimonial {testimonial} has rating {rating}, expected 1 to 5")]
    RatingOutOfRange { testimonial: u32, rating: i64 },
}

impl Violation {
    /// Entity kind of the offending record.
    pub fn entity(&self) -> Entity {
        match self {
            Violation::DanglingCategory { .. }
            | Violation::NegativePrice { .. }
            | Violation::PriceOutOfRange { .. }
            | Violation::MissingImages { .. } => Entity::Product,
            Violation::DuplicateId { entity, .. } | Violation::DuplicateSlug { entity, .. } => {
                *entity
            }
            Violation::RatingOutOfRange { .. } => Entity::Testimonial,
        }
    }
}

/// Errors that can occur in catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No entity matches the given key.
    #[error("{entity} not found: {key}")]
    NotFound { entity: Entity, key: String },

    /// Malformed or unrecognized filter parameter.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Loaded data breaks a catalog invariant.
    #[error("Integrity violation: {0}")]
    IntegrityViolation(#[from] Violation),

    /// Failed to read a catalog source.
    #[error("I/O error: {0}")]
    Io(String),

    /// Failed to parse a catalog source.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl CatalogError {
    pub(crate) fn not_found(entity: Entity, key: impl Into<String>) -> Self {
        CatalogError::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Check if this is a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::not_found(Entity::Product, "does-not-exist");
        assert_eq!(err.to_string(), "product not found: does-not-exist");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_violation_converts() {
        let err: CatalogError = Violation::MissingImages {
            product: "7".to_string(),
        }
        .into();
        assert!(matches!(err, CatalogError::IntegrityViolation(_)));
        assert_eq!(
            err.to_string(),
            "Integrity violation: product 7 has no images"
        );
    }

    #[test]
    fn test_violation_entity() {
        let v = Violation::DuplicateSlug {
            entity: Entity::Category,
            slug: "brincos".to_string(),
        };
        assert_eq!(v.entity(), Entity::Category);
        assert_eq!(
            Violation::RatingOutOfRange {
                testimonial: 1,
                rating: 6
            }
            .entity(),
            Entity::Testimonial
        );
    }
}
