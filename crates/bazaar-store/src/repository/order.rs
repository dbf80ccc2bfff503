//! # Order Repository
//!
//! Applies validated order plans and tracks order status.
//!
//! ## Plan, Then Apply
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    createOrder Under One Write Lock                     │
//! │                                                                         │
//! │  1. plan_order(lines, |id| store.find_product(id))     (bazaar-core)   │
//! │        │  validates EVERY line, never mutates                          │
//! │        ▼                                                                │
//! │  2. store.insert_order(buyer_id, &plan)                (this module)   │
//! │        │  reserve_stock for each planned item                          │
//! │        │  append Order { items: snapshot prices, total }               │
//! │        ▼                                                                │
//! │     Order (PENDING)                                                    │
//! │                                                                         │
//! │  A failing line stops at step 1, so stock is never partially taken.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use bazaar_core::order::OrderPlan;
use bazaar_core::{Order, OrderItem, OrderStatus};

use crate::error::{StoreError, StoreResult};
use crate::store::{generate_id, now, MarketStore};

impl MarketStore {
    /// Gets an order by id.
    pub fn find_order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Orders placed by `buyer_id`, oldest first.
    pub fn orders_by_buyer(&self, buyer_id: &str) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.is_placed_by(buyer_id)).collect()
    }

    /// Reserves stock for every planned item and records the order.
    ///
    /// The plan must come from [`bazaar_core::order::plan_order`] against
    /// this store, under the same lock. Every referenced product is checked
    /// before any stock moves.
    ///
    /// ## Returns
    /// * `Ok(Order)` - The new PENDING order
    /// * `Err(StoreError::NotFound)` - A planned product has since vanished
    pub fn insert_order(&mut self, buyer_id: &str, plan: &OrderPlan) -> StoreResult<Order> {
        if let Some(missing) = plan
            .items
            .iter()
            .find(|item| self.find_product(&item.product_id).is_none())
        {
            warn!(product_id = %missing.product_id, "Order plan references a missing product");
            return Err(StoreError::not_found("Product", missing.product_id.clone()));
        }

        for (product_id, quantity) in plan.reservations() {
            if let Some(product) = self.find_product_mut(product_id) {
                product.reserve_stock(quantity);
            }
        }

        let order = Order {
            id: generate_id(),
            buyer_id: buyer_id.to_string(),
            items: plan
                .items
                .iter()
                .map(|item| OrderItem {
                    id: generate_id(),
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                    price_cents: item.subtotal.cents(),
                })
                .collect(),
            total_price_cents: plan.total.cents(),
            status: OrderStatus::Pending,
            created_at: now(),
        };

        debug!(
            id = %order.id,
            buyer_id = %buyer_id,
            items = order.items.len(),
            total = %order.total_price(),
            "Inserting order"
        );

        self.orders.push(order.clone());
        Ok(order)
    }

    /// Sets the status of an order.
    pub fn set_order_status(&mut self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::not_found("Order", id))?;

        order.status = status;

        debug!(id = %id, status = ?status, "Updated order status");
        Ok(order.clone())
    }

    /// True when `user_id` sells at least one product in `order`.
    ///
    /// Items whose product was deleted no longer count.
    pub fn is_order_seller(&self, order: &Order, user_id: &str) -> bool {
        order.items.iter().any(|item| {
            self.find_product(&item.product_id)
                .is_some_and(|p| p.is_sold_by(user_id))
        })
    }
}
