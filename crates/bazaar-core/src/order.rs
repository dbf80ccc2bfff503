//! # Order Planning
//!
//! Validates a requested order against current stock **before** anything is
//! mutated, producing an [`OrderPlan`] the store applies in one step.
//!
//! ## All-or-Nothing Reservation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    createOrder([A×2, B×1, A×1])                         │
//! │                                                                         │
//! │  Phase 1: plan_order() ← THIS MODULE (read-only)                       │
//! │  ├── line 1: A exists? stock(A)=3 ≥ 2? ACTIVE?   claimed[A]=2          │
//! │  ├── line 2: B exists? stock(B)=5 ≥ 1? ACTIVE?   claimed[B]=1          │
//! │  └── line 3: A exists? 3 - claimed[A] = 1 ≥ 1?   claimed[A]=3          │
//! │           │                                                             │
//! │           │  any failure ──► Err, store untouched                      │
//! │           ▼                                                             │
//! │  Phase 2: store applies plan                                            │
//! │  ├── A.stock -= 2, A.stock -= 1  → 0 → A.status = SOLD                 │
//! │  └── B.stock -= 1                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Per line, checks run in a fixed order: quantity positive, product exists,
//! enough stock left (after earlier lines of the same order), product ACTIVE.
//! Subtotals and the total use checked arithmetic; overflow is an input error.

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OrderItemInput, Product};
use crate::validation::validate_quantity;

/// One validated line with its frozen subtotal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItem {
    pub product_id: String,
    pub quantity: i64,
    /// Unit price at planning time × quantity.
    pub subtotal: Money,
}

/// A fully validated order, ready to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlan {
    pub items: Vec<PlannedItem>,
    pub total: Money,
}

impl OrderPlan {
    /// Stock decrements to apply, in line order.
    pub fn reservations(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.items
            .iter()
            .map(|item| (item.product_id.as_str(), item.quantity))
    }
}

/// Builds an [`OrderPlan`] for `lines`, looking products up with `lookup`.
///
/// Fails at the first offending line; on failure nothing has been reserved,
/// because planning never mutates.
pub fn plan_order<'a, F>(lines: &[OrderItemInput], mut lookup: F) -> CoreResult<OrderPlan>
where
    F: FnMut(&str) -> Option<&'a Product>,
{
    if lines.is_empty() {
        return Err(CoreError::EmptyOrder);
    }

    let mut claimed: HashMap<&str, i64> = HashMap::new();
    let mut items = Vec::with_capacity(lines.len());
    let mut total = Money::zero();

    for line in lines {
        validate_quantity(line.quantity)?;

        let product = lookup(&line.product_id)
            .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;

        let already = claimed.get(product.id.as_str()).copied().unwrap_or(0);
        let available = product.stock - already;
        if available < line.quantity {
            return Err(CoreError::InsufficientStock {
                title: product.title.clone(),
                available,
                requested: line.quantity,
            });
        }

        if !product.is_active() {
            return Err(CoreError::ProductNotAvailable {
                title: product.title.clone(),
            });
        }

        let subtotal = product
            .price()
            .checked_multiply_quantity(line.quantity)
            .ok_or(CoreError::TotalOverflow)?;
        total = total.checked_add(subtotal).ok_or(CoreError::TotalOverflow)?;
        claimed.insert(product.id.as_str(), already + line.quantity);
        items.push(PlannedItem {
            product_id: product.id.clone(),
            quantity: line.quantity,
            subtotal,
        });
    }

    Ok(OrderPlan { items, total })
}

// =============================================================================
// Unit Tests
// =============================================================================
