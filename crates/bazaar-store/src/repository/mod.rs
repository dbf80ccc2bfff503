//! # Repository Module
//!
//! Per-entity operations on [`MarketStore`](crate::MarketStore).
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern, In Memory                        │
//! │                                                                         │
//! │  Each file adds an `impl MarketStore` block for one entity:            │
//! │                                                                         │
//! │  Resolver                                                              │
//! │       │                                                                 │
//! │       │  store.find_product(id)                                        │
//! │       │  store.insert_order(buyer_id, &plan)                           │
//! │       ▼                                                                 │
//! │  MarketStore                                                           │
//! │  ├── user.rs     find_user, find_user_by_email, insert_user, ...       │
//! │  ├── product.rs  find_product, insert_product, remove_product, ...     │
//! │  ├── order.rs    find_order, insert_order, set_order_status, ...       │
//! │  └── review.rs   reviews_for_product, insert_review, ...               │
//! │       │                                                                 │
//! │       │  linear scan over Vec<T>                                        │
//! │       ▼                                                                 │
//! │  Ordered collections                                                   │
//! │                                                                         │
//! │  Swapping in a real database later means re-implementing these         │
//! │  signatures; resolvers stay the same.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod order;
pub mod product;
pub mod review;
pub mod user;
