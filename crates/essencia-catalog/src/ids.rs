//! Newtype IDs for catalog entities.
//!
//! Category and product identifiers are opaque strings in the source data;
//! wrapping them keeps a `CategoryId` from being passed where a `ProductId`
//! is expected. Testimonials are numbered, so their ID wraps a `u32`.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Macro to generate string-backed newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a product category.
    CategoryId
);
define_id!(
    /// Identifier of a product.
    ProductId
);

/// Identifier of a customer testimonial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestimonialId(u32);

impl TestimonialId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for TestimonialId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TestimonialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("12");
        assert_eq!(id.as_str(), "12");
    }

    #[test]
    fn test_id_from_string() {
        let id: CategoryId = "4".into();
        assert_eq!(id.as_str(), "4");
        assert_eq!(id.into_inner(), "4".to_string());
    }

    #[test]
    fn test_id_display() {
        let id = ProductId::new("27");
        assert_eq!(format!("{}", id), "27");
        assert_eq!(TestimonialId::new(3).to_string(), "3");
    }

    #[test]
    fn test_id_borrow_lookup() {
        let mut index = HashMap::new();
        index.insert(ProductId::new("1"), "brincos-perola-dourados");
        assert_eq!(index.get("1"), Some(&"brincos-perola-dourados"));
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&ProductId::new("9")).unwrap();
        assert_eq!(json, "\"9\"");

        let id: TestimonialId = serde_json::from_str("2").unwrap();
        assert_eq!(id.get(), 2);
    }
}
