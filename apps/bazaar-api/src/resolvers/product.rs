//! Product queries and listing management.

use tracing::info;

use bazaar_core::catalog::{filter_active, paginate, ProductFilter};
use bazaar_core::validation::{validate_price_cents, validate_stock};
use bazaar_core::{ProductCategory, ProductInput, ProductStatus, ValidationError};
use bazaar_store::MarketStore;

use super::Caller;
use crate::error::{ApiError, ApiResult};
use crate::views::{PaginatedProducts, ProductView};

// =============================================================================
// Queries
// =============================================================================

/// Every ACTIVE listing.
pub fn products(store: &MarketStore) -> Vec<ProductView> {
    products_by_filter(store, &ProductFilter::default())
}

/// A single listing in any status.
pub fn product(store: &MarketStore, id: &str) -> ApiResult<ProductView> {
    let product = store
        .find_product(id)
        .ok_or_else(|| ApiError::bad_input("Product not found"))?;

    Ok(ProductView::build(store, product))
}

pub fn products_by_category(store: &MarketStore, category: ProductCategory) -> Vec<ProductView> {
    products_by_filter(
        store,
        &ProductFilter {
            category: Some(category),
            ..Default::default()
        },
    )
}

/// ACTIVE listings matching every present field of `filter`.
pub fn products_by_filter(store: &MarketStore, filter: &ProductFilter) -> Vec<ProductView> {
    ProductView::build_all(store, filter_active(store.products(), filter))
}

pub fn paginated_products(store: &MarketStore, page: i64, limit: i64) -> ApiResult<PaginatedProducts> {
    let active = filter_active(store.products(), &ProductFilter::default());
    let page = paginate(active, page, limit)?;

    Ok(PaginatedProducts {
        products: ProductView::build_all(store, page.items),
        total_pages: page.total_pages,
        current_page: page.current_page,
        total_products: page.total_items,
    })
}

/// The caller's own listings, any status.
pub fn my_products(store: &MarketStore, caller: &Caller) -> ApiResult<Vec<ProductView>> {
    let user_id = caller.user_id()?;
    Ok(ProductView::build_all(store, store.products_by_seller(user_id)))
}

// =============================================================================
// Mutations
// =============================================================================

pub fn add_product(
    store: &mut MarketStore,
    caller: &Caller,
    input: ProductInput,
) -> ApiResult<ProductView> {
    let seller = caller.account(store)?;
    if !seller.role.can_sell() {
        return Err(ApiError::forbidden("Only sellers can add products"));
    }
    let seller_id = seller.id.clone();

    validate_price_cents(input.price_cents)?;
    validate_stock(input.stock)?;

    let product = store.insert_product(&seller_id, input);
    info!(id = %product.id, seller_id = %seller_id, price = %product.price(), "Product listed");

    Ok(ProductView::build(store, &product))
}

/// Replaces a listing's fields. `status` may toggle ACTIVE/INACTIVE;
/// SOLD is only ever set by an order.
pub fn update_product(
    store: &mut MarketStore,
    caller: &Caller,
    id: &str,
    input: &ProductInput,
    status: Option<ProductStatus>,
) -> ApiResult<ProductView> {
    let user_id = caller.user_id()?;

    let product = store
        .find_product(id)
        .ok_or_else(|| ApiError::bad_input("Product not found"))?;
    if !product.is_sold_by(user_id) {
        return Err(ApiError::forbidden("You can only update your own products"));
    }

    validate_price_cents(input.price_cents)?;
    validate_stock(input.stock)?;
    if status == Some(ProductStatus::Sold) {
        return Err(ValidationError::NotAllowed {
            field: "Status".to_string(),
            allowed: vec!["ACTIVE".to_string(), "INACTIVE".to_string()],
        }
        .into());
    }

    let product = store.update_product(id, input, status)?;
    info!(id = %id, status = ?product.status, "Product updated");

    Ok(ProductView::build(store, &product))
}

/// Deletes a listing and its reviews.
pub fn delete_product(store: &mut MarketStore, caller: &Caller, id: &str) -> ApiResult<bool> {
    let user_id = caller.user_id()?;

    let product = store
        .find_product(id)
        .ok_or_else(|| ApiError::bad_input("Product not found"))?;
    if !product.is_sold_by(user_id) {
        return Err(ApiError::forbidden("You can only delete your own products"));
    }

    let removed = store.remove_product(id);
    info!(id = %id, "Product deleted");
    Ok(removed)
}
