//! # bazaar-core: Pure Marketplace Logic for Bazaar
//!
//! This crate is the **heart** of Bazaar. It contains the marketplace rules
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Bazaar Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (SPA)                               │   │
//! │  │    Catalog ──► Product Detail ──► Cart ──► Orders ──► Reviews   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ POST /graphql                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bazaar-api (resolvers)                       │   │
//! │  │    register, addProduct, createOrder, addReview, etc.          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ OrderPlan │  │   rules   │  │   │
//! │  │   │  Order    │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                  ┌───────────┐                                  │   │
//! │  │                  │  catalog  │  filter, paginate, avg rating    │   │
//! │  │                  └───────────┘                                  │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  bazaar-store (In-Memory Store)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Product, Order, Review, inputs)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level predicates and validators
//! - [`order`] - All-or-nothing order planning against current stock
//! - [`catalog`] - Product filtering, pagination and rating aggregation
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::money::Money;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(15999); // $159.99
//!
//! // Line subtotal for two units
//! let subtotal = price * 2i64;
//! assert_eq!(subtotal.cents(), 31998);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Inclusive bounds for a review rating.
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;
