//! # Review Repository
//!
//! At most one review per (product, user) pair is stored.

use tracing::debug;

use bazaar_core::catalog::average_rating;
use bazaar_core::Review;

use crate::error::{StoreError, StoreResult};
use crate::store::{generate_id, now, MarketStore};

impl MarketStore {
    pub fn find_review(&self, id: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == id)
    }

    pub fn reviews_for_product(&self, product_id: &str) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .collect()
    }

    pub fn reviews_by_user(&self, user_id: &str) -> Vec<&Review> {
        self.reviews.iter().filter(|r| r.user_id == user_id).collect()
    }

    /// True if `user_id` already reviewed `product_id`.
    pub fn has_review(&self, product_id: &str, user_id: &str) -> bool {
        self.reviews
            .iter()
            .any(|r| r.product_id == product_id && r.user_id == user_id)
    }

    /// Appends a review. The rating must already be validated.
    ///
    /// ## Returns
    /// * `Ok(Review)` - The stored review
    /// * `Err(StoreError::Duplicate)` - The user already reviewed the product
    pub fn insert_review(
        &mut self,
        product_id: &str,
        user_id: &str,
        rating: u8,
        comment: String,
    ) -> StoreResult<Review> {
        if self.has_review(product_id, user_id) {
            return Err(StoreError::duplicate(
                "review",
                format!("{user_id} on {product_id}"),
            ));
        }

        let review = Review {
            id: generate_id(),
            product_id: product_id.to_string(),
            user_id: user_id.to_string(),
            rating,
            comment,
            created_at: now(),
        };

        debug!(id = %review.id, product_id = %product_id, rating, "Inserting review");

        self.reviews.push(review.clone());
        Ok(review)
    }

    /// Removes a review; `false` if it did not exist.
    pub fn remove_review(&mut self, id: &str) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.id != id);
        let removed = self.reviews.len() < before;
        if removed {
            debug!(id = %id, "Removed review");
        }
        removed
    }

    /// Mean rating of a product's reviews, `None` with no reviews.
    pub fn average_rating_for(&self, product_id: &str) -> Option<f64> {
        average_rating(
            self.reviews
                .iter()
                .filter(|r| r.product_id == product_id)
                .map(|r| r.rating),
        )
    }
}
