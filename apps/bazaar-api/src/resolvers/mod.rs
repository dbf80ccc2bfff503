//! # Resolvers
//!
//! One handler per [`Operation`] variant, grouped by entity.
//!
//! ## Handler Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Mutating Handler                               │
//! │                                                                         │
//! │  (a) caller.user_id()?         → UNAUTHENTICATED "Not authenticated"    │
//! │  (b) load referenced entities  → BAD_USER_INPUT  "<Entity> not found"   │
//! │  (c) ownership / role rules    → FORBIDDEN                              │
//! │  (d) field validators          → BAD_USER_INPUT                         │
//! │  (e) mutate the store                                                   │
//! │  (f) return the view / bool                                             │
//! │                                                                         │
//! │  The first failing step wins; nothing is mutated before (e).            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers other than `register` and `login` are synchronous functions of
//! the store. [`execute`] takes the lock once per operation (read for
//! queries, write for mutations) and holds it until the handler returns.

pub mod auth;
pub mod order;
pub mod product;
pub mod review;
pub mod user;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use bazaar_core::User;
use bazaar_store::MarketStore;

use crate::error::{ApiError, ApiResult};
use crate::schema::Operation;
use crate::AppState;

/// Identity of whoever sent the request.
///
/// An invalid or missing token gives an anonymous caller; each operation
/// decides whether that is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    user_id: Option<String>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Caller { user_id: None }
    }

    pub fn user(user_id: impl Into<String>) -> Self {
        Caller {
            user_id: Some(user_id.into()),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    /// The caller's user id, or UNAUTHENTICATED.
    pub fn user_id(&self) -> ApiResult<&str> {
        self.user_id.as_deref().ok_or_else(ApiError::unauthenticated)
    }

    /// The caller's account. A token for an account that no longer exists
    /// counts as no token.
    pub fn account<'s>(&self, store: &'s MarketStore) -> ApiResult<&'s User> {
        store
            .find_user(self.user_id()?)
            .ok_or_else(ApiError::unauthenticated)
    }
}

/// Runs `operation` on behalf of `caller` and serializes its result.
pub async fn execute(state: &AppState, caller: &Caller, operation: Operation) -> ApiResult<Value> {
    use Operation as Op;

    debug!(mutation = operation.is_mutation(), anonymous = caller.is_anonymous(), "Executing operation");

    match operation {
        // Credential operations hash outside the store lock.
        Op::Register {
            email,
            password,
            name,
            role,
        } => respond(auth::register(state, email, password, name, role).await),
        Op::Login { email, password } => respond(auth::login(state, email, password).await),

        // ---------------------------------------------------------------------
        // Queries (read lock)
        // ---------------------------------------------------------------------
        Op::Products {} => respond(Ok(product::products(&*state.store.read().await))),
        Op::Product { id } => respond(product::product(&*state.store.read().await, &id)),
        Op::ProductsByCategory { category } => respond(Ok(product::products_by_category(
            &*state.store.read().await,
            category,
        ))),
        Op::ProductsByFilter { filter } => respond(Ok(product::products_by_filter(
            &*state.store.read().await,
            &filter,
        ))),
        Op::PaginatedProducts { page, limit } => respond(product::paginated_products(
            &*state.store.read().await,
            page,
            limit,
        )),
        Op::MyProducts {} => respond(product::my_products(&*state.store.read().await, caller)),
        Op::Orders {} | Op::MyOrders {} => {
            respond(order::my_orders(&*state.store.read().await, caller))
        }
        Op::ProductReviews { product_id } => respond(Ok(review::product_reviews(
            &*state.store.read().await,
            &product_id,
        ))),
        Op::User { id } => respond(user::user(&*state.store.read().await, &id)),
        Op::Me {} => respond(user::me(&*state.store.read().await, caller)),

        // ---------------------------------------------------------------------
        // Mutations (write lock)
        // ---------------------------------------------------------------------
        Op::AddProduct { input } => {
            respond(product::add_product(&mut *state.store.write().await, caller, input))
        }
        Op::UpdateProduct { id, input, status } => respond(product::update_product(
            &mut *state.store.write().await,
            caller,
            &id,
            &input,
            status,
        )),
        Op::DeleteProduct { id } => {
            respond(product::delete_product(&mut *state.store.write().await, caller, &id))
        }
        Op::AddReview { input } => {
            respond(review::add_review(&mut *state.store.write().await, caller, input))
        }
        Op::DeleteReview { id } => {
            respond(review::delete_review(&mut *state.store.write().await, caller, &id))
        }
        Op::CreateOrder { items } => {
            respond(order::create_order(&mut *state.store.write().await, caller, &items))
        }
        Op::UpdateOrderStatus { id, status } => respond(order::update_order_status(
            &mut *state.store.write().await,
            caller,
            &id,
            status,
        )),
        Op::UpdateUser {
            name,
            phone,
            address,
        } => respond(user::update_user(
            &mut *state.store.write().await,
            caller,
            name,
            phone,
            address,
        )),
    }
}

fn respond<T: Serialize>(result: ApiResult<T>) -> ApiResult<Value> {
    Ok(serde_json::to_value(result?)?)
}
