//! # bazaar-store: In-Memory Data Store for Bazaar
//!
//! This crate provides the mock data store the API resolvers read and
//! mutate. Everything lives in process memory; nothing is persisted.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bazaar Data Flow                                │
//! │                                                                         │
//! │  Resolver (createOrder)                                                │
//! │       │  store.write().await                                            │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bazaar-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  MarketStore  │    │  Repositories │    │    Seed      │  │   │
//! │  │   │  (store.rs)   │    │ (impl blocks) │    │  (seed.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ users         │◄───│ user.rs       │    │ 4 users      │  │   │
//! │  │   │ products      │    │ product.rs    │    │ 8 products   │  │   │
//! │  │   │ orders        │    │ order.rs      │    │ 3 orders     │  │   │
//! │  │   │ reviews       │    │ review.rs     │    │ 4 reviews    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `MarketStore` collections
//! - [`repository`] - Per-entity operations (find, insert, update, remove)
//! - [`seed`] - Development data set
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use bazaar_store::MarketStore;
//!
//! let store = MarketStore::seeded("$argon2id$placeholder");
//! assert_eq!(store.user_count(), 4);
//! assert!(store.find_user_by_email("jane@buyer.com").is_some());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use repository::user::NewUser;
pub use store::MarketStore;
