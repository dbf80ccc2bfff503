//! # Market Store
//!
//! The four ordered entity collections.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Who Owns the Store?                                │
//! │                                                                         │
//! │  main()                                                                │
//! │    │  MarketStore::seeded(hash)                                         │
//! │    ▼                                                                    │
//! │  AppState { store: Arc<RwLock<MarketStore>> }                          │
//! │    │                                                                    │
//! │    ├──► resolver A: store.read().await   (queries)                     │
//! │    └──► resolver B: store.write().await  (mutations)                   │
//! │                                                                         │
//! │  The store itself has no interior locking: `&self` reads,              │
//! │  `&mut self` writes. The caller decides how to share it.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collections keep insertion order; every listing operation returns
//! entities in that order.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use bazaar_core::{Order, Product, Review, User};

/// In-memory marketplace data.
#[derive(Debug, Clone, Default)]
pub struct MarketStore {
    pub(crate) users: Vec<User>,
    pub(crate) products: Vec<Product>,
    pub(crate) orders: Vec<Order>,
    pub(crate) reviews: Vec<Review>,
}

impl MarketStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MarketStore::default()
    }

    /// Creates a store loaded with the development data set.
    ///
    /// Every seeded account shares `password_hash`, which the caller
    /// computes (the store never touches plaintext credentials).
    pub fn seeded(password_hash: &str) -> Self {
        let mut store = MarketStore::new();
        crate::seed::load(&mut store, password_hash);
        debug!(
            users = store.users.len(),
            products = store.products.len(),
            orders = store.orders.len(),
            reviews = store.reviews.len(),
            "Seeded store"
        );
        store
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }
}

/// Generates a new entity id.
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Creation timestamp for a new entity.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}
