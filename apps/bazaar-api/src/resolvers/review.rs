//! Reviews: one per buyer per product, never on one's own listing.

use tracing::info;

use bazaar_core::validation::validate_rating;
use bazaar_core::ReviewInput;
use bazaar_store::MarketStore;

use super::Caller;
use crate::error::{ApiError, ApiResult};
use crate::views::ReviewView;

pub fn product_reviews(store: &MarketStore, product_id: &str) -> Vec<ReviewView> {
    store
        .reviews_for_product(product_id)
        .into_iter()
        .map(|r| ReviewView::build(store, r))
        .collect()
}

pub fn add_review(
    store: &mut MarketStore,
    caller: &Caller,
    input: ReviewInput,
) -> ApiResult<ReviewView> {
    let user_id = caller.user_id()?;
    let rating = validate_rating(input.rating)?;

    let product = store
        .find_product(&input.product_id)
        .ok_or_else(|| ApiError::bad_input("Product not found"))?;
    if product.is_sold_by(user_id) {
        return Err(ApiError::forbidden("Cannot review your own product"));
    }
    if store.has_review(&input.product_id, user_id) {
        return Err(ApiError::bad_input("You have already reviewed this product"));
    }

    let review = store.insert_review(&input.product_id, user_id, rating, input.comment)?;
    info!(id = %review.id, product_id = %review.product_id, rating, "Review added");

    Ok(ReviewView::build(store, &review))
}

pub fn delete_review(store: &mut MarketStore, caller: &Caller, id: &str) -> ApiResult<bool> {
    let user_id = caller.user_id()?;

    let review = store
        .find_review(id)
        .ok_or_else(|| ApiError::bad_input("Review not found"))?;
    if review.user_id != user_id {
        return Err(ApiError::forbidden("You can only delete your own reviews"));
    }

    let removed = store.remove_review(id);
    info!(id = %id, "Review deleted");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::resolvers::product::{delete_product, product};
    use crate::resolvers::test_support::{alice, bob, jane, john, seeded};

    fn input(product_id: &str, rating: i64) -> ReviewInput {
        ReviewInput {
            product_id: product_id.to_string(),
            rating,
            comment: "Solid purchase".to_string(),
        }
    }

    #[test]
    fn test_add_review_and_average() {
        let mut store = seeded();

        // 103 already has jane's 5.
        add_review(&mut store, &alice(), input("103", 4)).unwrap();
        let view = add_review(&mut store, &john(), input("103", 5)).unwrap();
        assert_eq!(view.user.unwrap().name, "John Doe");
        assert_eq!(view.product.unwrap().id, "103");

        let avg = product(&store, "103").unwrap().average_rating.unwrap();
        assert!((avg - 14.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_cannot_review_twice() {
        let mut store = seeded();
        let err = add_review(&mut store, &jane(), input("103", 3)).unwrap_err();
        assert_eq!(err, ApiError::bad_input("You have already reviewed this product"));
    }

    #[test]
    fn test_cannot_review_own_product() {
        let mut store = seeded();
        let err = add_review(&mut store, &bob(), input("103", 5)).unwrap_err();
        assert_eq!(err, ApiError::forbidden("Cannot review your own product"));
    }

    #[test]
    fn test_rating_bounds() {
        let mut store = seeded();
        for rating in [0, 6, -1] {
            let err = add_review(&mut store, &alice(), input("102", rating)).unwrap_err();
            assert_eq!(err, ApiError::bad_input("Rating must be between 1 and 5"));
        }
        assert!(add_review(&mut store, &alice(), input("999", 3)).is_err());
        assert!(product_reviews(&store, "102").is_empty());
    }

    #[test]
    fn test_delete_review() {
        let mut store = seeded();

        let err = delete_review(&mut store, &alice(), "401").unwrap_err();
        assert_eq!(err, ApiError::forbidden("You can only delete your own reviews"));

        let err = delete_review(&mut store, &Caller::anonymous(), "401").unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);

        assert!(delete_review(&mut store, &jane(), "401").unwrap());
        let err = delete_review(&mut store, &jane(), "401").unwrap_err();
        assert_eq!(err, ApiError::bad_input("Review not found"));
    }

    #[test]
    fn test_deleting_product_clears_its_reviews() {
        let mut store = seeded();
        add_review(&mut store, &alice(), input("103", 4)).unwrap();
        assert_eq!(product_reviews(&store, "103").len(), 2);

        delete_product(&mut store, &bob(), "103").unwrap();

        assert!(product_reviews(&store, "103").is_empty());
    }
}
