//! Order placement and status tracking.
//!
//! ## createOrder
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items: [{ productId: "104", quantity: 2 }, { productId: "999", ... }]  │
//! │                                                                         │
//! │  plan_order ── line 1: 104 found, stock 3 ≥ 2, ACTIVE      ✓          │
//! │             └─ line 2: 999 missing ──► "Product 999 not found"  ✗     │
//! │                                                                         │
//! │  Sofa stock stays 3: nothing is reserved until every line passes.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use bazaar_core::order::plan_order;
use bazaar_core::{OrderItemInput, OrderStatus};
use bazaar_store::MarketStore;

use super::Caller;
use crate::error::{ApiError, ApiResult};
use crate::views::OrderView;

/// Orders the caller placed as a buyer.
pub fn my_orders(store: &MarketStore, caller: &Caller) -> ApiResult<Vec<OrderView>> {
    let user_id = caller.user_id()?;
    Ok(OrderView::build_all(store, store.orders_by_buyer(user_id)))
}

/// Places an order, reserving stock for all items or none.
pub fn create_order(
    store: &mut MarketStore,
    caller: &Caller,
    items: &[OrderItemInput],
) -> ApiResult<OrderView> {
    let buyer_id = caller.user_id()?;

    let plan = plan_order(items, |id| store.find_product(id)).map_err(|e| {
        warn!(buyer_id = %buyer_id, error = %e, "Order rejected");
        ApiError::from(e)
    })?;

    let order = store.insert_order(buyer_id, &plan)?;
    info!(
        id = %order.id,
        buyer_id = %buyer_id,
        items = order.items.len(),
        total = %order.total_price(),
        "Order placed"
    );

    Ok(OrderView::build(store, &order))
}

/// Changes an order's status. Allowed for the buyer and for any seller
/// with a product in the order.
pub fn update_order_status(
    store: &mut MarketStore,
    caller: &Caller,
    id: &str,
    status: OrderStatus,
) -> ApiResult<OrderView> {
    let user_id = caller.user_id()?;

    let order = store
        .find_order(id)
        .ok_or_else(|| ApiError::bad_input("Order not found"))?;
    if !order.is_placed_by(user_id) && !store.is_order_seller(order, user_id) {
        return Err(ApiError::forbidden("Not authorized to update this order"));
    }

    let order = store.set_order_status(id, status)?;
    info!(id = %id, status = ?status, "Order status updated");

    Ok(OrderView::build(store, &order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::resolvers::test_support::{alice, bob, jane, john, seeded};
    use bazaar_core::ProductStatus;

    fn line(product_id: &str, quantity: i64) -> OrderItemInput {
        OrderItemInput {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_my_orders() {
        let store = seeded();
        assert_eq!(my_orders(&store, &jane()).unwrap().len(), 2);
        assert_eq!(my_orders(&store, &alice()).unwrap().len(), 1);
        assert!(my_orders(&store, &john()).unwrap().is_empty());
    }

    #[test]
    fn test_create_order_requires_auth() {
        let mut store = seeded();
        let err = create_order(&mut store, &Caller::anonymous(), &[line("104", 1)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
    }

    #[test]
    fn test_buying_last_units_marks_sold() {
        let mut store = seeded();

        let view = create_order(&mut store, &jane(), &[line("104", 3)]).unwrap();

        assert_eq!(view.total_price_cents, 3 * 49999);
        assert_eq!(view.status, OrderStatus::Pending);
        assert_eq!(view.buyer_id, "2");

        let sofa = store.find_product("104").unwrap();
        assert_eq!(sofa.stock, 0);
        assert_eq!(sofa.status, ProductStatus::Sold);
    }

    #[test]
    fn test_total_is_sum_of_item_subtotals() {
        let mut store = seeded();

        let view = create_order(&mut store, &alice(), &[line("103", 2), line("107", 1)]).unwrap();

        let sum: i64 = view.items.iter().map(|i| i.item.price_cents).sum();
        assert_eq!(view.total_price_cents, sum);
        assert_eq!(view.total_price_cents, 39997);
        assert_eq!(store.find_product("103").unwrap().stock, 23);
    }

    #[test]
    fn test_insufficient_stock_names_product() {
        let mut store = seeded();

        let err = create_order(&mut store, &jane(), &[line("104", 4)]).unwrap_err();

        assert_eq!(err, ApiError::bad_input("Insufficient stock for Leather Sofa - 3 Seater"));
        assert_eq!(store.find_product("104").unwrap().stock, 3);
    }

    #[test]
    fn test_failing_line_reserves_nothing() {
        let mut store = seeded();

        let err = create_order(
            &mut store,
            &jane(),
            &[line("103", 5), line("107", 1), line("999", 1)],
        )
        .unwrap_err();

        assert_eq!(err, ApiError::bad_input("Product 999 not found"));
        assert_eq!(store.find_product("103").unwrap().stock, 25);
        assert_eq!(store.find_product("107").unwrap().stock, 30);
        assert_eq!(store.order_count(), 3);
    }

    #[test]
    fn test_inactive_product_not_available() {
        let mut store = seeded();
        let input = bazaar_core::ProductInput {
            title: "Yoga Mat Premium".to_string(),
            description: "Extra thick".to_string(),
            price_cents: 4599,
            category: bazaar_core::ProductCategory::Sports,
            condition: bazaar_core::ProductCondition::New,
            images: vec![],
            stock: 50,
        };
        store
            .update_product("108", &input, Some(ProductStatus::Inactive))
            .unwrap();

        let err = create_order(&mut store, &jane(), &[line("108", 1)]).unwrap_err();
        assert_eq!(err, ApiError::bad_input("Product Yoga Mat Premium is not available"));
    }

    #[test]
    fn test_quantity_over_stock_names_product() {
        let mut store = seeded();

        let err = create_order(&mut store, &jane(), &[line("108", 1000)]).unwrap_err();
        assert_eq!(err, ApiError::bad_input("Insufficient stock for Yoga Mat Premium"));
    }

    #[test]
    fn test_overflowing_total_rejected_without_reserving() {
        let mut store = seeded();
        let huge = |title: &str| bazaar_core::ProductInput {
            title: title.to_string(),
            description: "Priced to overflow".to_string(),
            price_cents: i64::MAX / 2 + 1,
            category: bazaar_core::ProductCategory::Other,
            condition: bazaar_core::ProductCondition::New,
            images: vec![],
            stock: 5,
        };
        store.update_product("107", &huge("Gold Mouse"), None).unwrap();
        store.update_product("108", &huge("Gold Mat"), None).unwrap();

        let err = create_order(&mut store, &jane(), &[line("107", 1), line("108", 1)]).unwrap_err();

        assert_eq!(err, ApiError::bad_input("Order total is too large"));
        assert_eq!(store.find_product("107").unwrap().stock, 5);
        assert_eq!(store.find_product("108").unwrap().stock, 5);
        assert_eq!(store.order_count(), 3);
    }

    #[test]
    fn test_empty_order_rejected() {
        let mut store = seeded();
        let err = create_order(&mut store, &jane(), &[]).unwrap_err();
        assert_eq!(err, ApiError::bad_input("Order must contain at least one item"));
    }

    #[test]
    fn test_update_status_by_buyer_and_seller() {
        let mut store = seeded();

        // Order 202: alice bought product 101 from john.
        let view = update_order_status(&mut store, &alice(), "202", OrderStatus::Cancelled).unwrap();
        assert_eq!(view.status, OrderStatus::Cancelled);

        let view = update_order_status(&mut store, &john(), "202", OrderStatus::Delivered).unwrap();
        assert_eq!(view.status, OrderStatus::Delivered);

        let err = update_order_status(&mut store, &bob(), "202", OrderStatus::Shipped).unwrap_err();
        assert_eq!(err, ApiError::forbidden("Not authorized to update this order"));

        let err = update_order_status(&mut store, &jane(), "202", OrderStatus::Shipped).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err = update_order_status(&mut store, &jane(), "999", OrderStatus::Shipped).unwrap_err();
        assert_eq!(err, ApiError::bad_input("Order not found"));
    }
}
