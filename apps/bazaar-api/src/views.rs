//! # Response Views
//!
//! Entities plus their derived fields, as the SPA receives them.
//!
//! ## Embedding Depth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductView ── seller: User                                           │
//! │              ── reviews: [Review]                                      │
//! │              ── averageRating: number | null                           │
//! │                                                                         │
//! │  OrderView   ── buyer: User                                            │
//! │              ── items: [{ ...OrderItem, product: Product | null }]     │
//! │                                                                         │
//! │  ReviewView  ── user: User, product: Product                           │
//! │                                                                         │
//! │  ProfileView ── products: [Product], orders: [Order],                  │
//! │                 reviews: [Review]                                      │
//! │                                                                         │
//! │  Related entities are embedded one level deep, as plain entities,      │
//! │  so a response never cycles back to its parent.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Derived fields are computed by scanning the store each time a view is
//! built. A referenced entity that no longer exists (an order item whose
//! product was deleted) renders as `null`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bazaar_core::{Order, OrderItem, OrderStatus, Product, Review, User};
use bazaar_store::MarketStore;

/// A product with its seller, reviews and average rating.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub seller: Option<User>,
    pub reviews: Vec<Review>,
    /// Absent (not zero) when there are no reviews.
    pub average_rating: Option<f64>,
}

impl ProductView {
    pub fn build(store: &MarketStore, product: &Product) -> Self {
        ProductView {
            product: product.clone(),
            seller: store.find_user(&product.seller_id).cloned(),
            reviews: store
                .reviews_for_product(&product.id)
                .into_iter()
                .cloned()
                .collect(),
            average_rating: store.average_rating_for(&product.id),
        }
    }

    pub fn build_all<'a, I>(store: &MarketStore, products: I) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        products
            .into_iter()
            .map(|p| ProductView::build(store, p))
            .collect()
    }
}

/// An order line with the product it refers to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product: Option<Product>,
}

/// An order with its buyer and item products.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub buyer_id: String,
    pub buyer: Option<User>,
    pub items: Vec<OrderItemView>,
    #[serde(rename = "totalPrice", with = "bazaar_core::money::dollars")]
    pub total_price_cents: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderView {
    pub fn build(store: &MarketStore, order: &Order) -> Self {
        OrderView {
            id: order.id.clone(),
            buyer_id: order.buyer_id.clone(),
            buyer: store.find_user(&order.buyer_id).cloned(),
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    item: item.clone(),
                    product: store.find_product(&item.product_id).cloned(),
                })
                .collect(),
            total_price_cents: order.total_price_cents,
            status: order.status,
            created_at: order.created_at,
        }
    }

    pub fn build_all<'a, I>(store: &MarketStore, orders: I) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a Order>,
    {
        orders
            .into_iter()
            .map(|o| OrderView::build(store, o))
            .collect()
    }
}

/// A review with its author and product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    pub user: Option<User>,
    pub product: Option<Product>,
}

impl ReviewView {
    pub fn build(store: &MarketStore, review: &Review) -> Self {
        ReviewView {
            review: review.clone(),
            user: store.find_user(&review.user_id).cloned(),
            product: store.find_product(&review.product_id).cloned(),
        }
    }
}

/// A user with everything they listed, ordered and reviewed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    #[serde(flatten)]
    pub user: User,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub reviews: Vec<Review>,
}

impl ProfileView {
    pub fn build(store: &MarketStore, user: &User) -> Self {
        ProfileView {
            user: user.clone(),
            products: store
                .products_by_seller(&user.id)
                .into_iter()
                .cloned()
                .collect(),
            orders: store.orders_by_buyer(&user.id).into_iter().cloned().collect(),
            reviews: store.reviews_by_user(&user.id).into_iter().cloned().collect(),
        }
    }
}

/// Result of `register` and `login`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// Result of `paginatedProducts`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedProducts {
    pub products: Vec<ProductView>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total_products: i64,
}
