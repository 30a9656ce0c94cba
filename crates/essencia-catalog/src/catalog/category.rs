//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category. Products refer to it by `slug`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL-friendly slug (unique, stable once assigned).
    pub slug: String,
    /// Representative image URL.
    pub image_url: String,
}

impl Category {
    /// Create a new category.
    pub fn new(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        slug: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            image_url: image_url.into(),
        }
    }

    /// Check whether the category has the given slug.
    pub fn has_slug(&self, slug: &str) -> bool {
        self.slug == slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_creation() {
        let cat = Category::new("6", "Sabonetes Artesanais", "sabonetes", "https://img/6.jpg");
        assert_eq!(cat.id.as_str(), "6");
        assert_eq!(cat.name, "Sabonetes Artesanais");
        assert!(cat.has_slug("sabonetes"));
        assert!(!cat.has_slug("velas"));
    }
}
