//! Customer testimonials.

use crate::ids::TestimonialId;
use serde::{Deserialize, Serialize};

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// A customer testimonial shown on the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Testimonial {
    pub id: TestimonialId,
    /// Name of the customer.
    pub author: String,
    /// Free-text review.
    pub content: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
}

impl Testimonial {
    pub fn new(
        id: impl Into<TestimonialId>,
        author: impl Into<String>,
        content: impl Into<String>,
        rating: u8,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            content: content.into(),
            rating,
        }
    }

    /// Check whether a raw rating is within the accepted range.
    pub fn is_valid_rating(rating: i64) -> bool {
        (MIN_RATING as i64..=MAX_RATING as i64).contains(&rating)
    }

    /// Render the rating as filled and empty stars.
    pub fn stars(&self) -> String {
        let filled = self.rating.min(MAX_RATING) as usize;
        let empty = MAX_RATING as usize - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}
