//! # Domain Types
//!
//! Core domain types used throughout Bazaar.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Product      │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  seller_id      │   │  buyer_id ──────┼──►User│
//! │  │  email (unique) │   │  price_cents    │◄──│  items[]        │       │
//! │  │  role           │   │  stock, status  │   │  total_cents    │       │
//! │  └─────────────────┘   └────────▲────────┘   └─────────────────┘       │
//! │                                 │                                       │
//! │                        ┌────────┴────────┐                              │
//! │                        │     Review      │  one per (product, user)    │
//! │                        │  rating 1..=5   │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names are camelCase and enum variants SCREAMING_SNAKE_CASE, matching
//! the names the SPA already uses (`LIKE_NEW`, `createdAt`, ...). Amounts are
//! integer cents in memory and decimal dollars on the wire (`price: 159.99`).
//! Input types reject unknown fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Enums
// =============================================================================

/// Account role chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Buyer,
    Seller,
    Admin,
}

impl UserRole {
    /// Whether this role may list products.
    pub const fn can_sell(&self) -> bool {
        matches!(self, UserRole::Seller | UserRole::Admin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Electronics,
    Fashion,
    Home,
    Books,
    Sports,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCondition {
    New,
    LikeNew,
    Good,
    Fair,
}

/// Listing lifecycle state.
///
/// ```text
///   addProduct ──► ACTIVE ──(stock hits 0 via order)──► SOLD
///                    ▲ │
///   updateProduct ───┘ └──► INACTIVE
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Sold,
    Inactive,
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Login email, unique across users.
    pub email: String,

    /// Argon2 PHC string. Never serialized.
    #[serde(skip)]
    #[ts(skip)]
    pub password_hash: String,

    /// Display name.
    pub name: String,

    pub role: UserRole,

    pub phone: Option<String>,

    pub address: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Applies a profile update. Absent or blank fields are left untouched.
    pub fn apply_update(&mut self, update: &UserUpdate) {
        if let Some(name) = non_blank(&update.name) {
            self.name = name;
        }
        if let Some(phone) = non_blank(&update.phone) {
            self.phone = Some(phone);
        }
        if let Some(address) = non_blank(&update.address) {
            self.address = Some(address);
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Profile fields a user may change on their own account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A listing offered by a seller.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub title: String,

    pub description: String,

    /// Unit price in cents. Always > 0. Dollars on the wire as `price`.
    #[serde(rename = "price", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub price_cents: i64,

    pub category: ProductCategory,

    pub condition: ProductCondition,

    pub status: ProductStatus,

    /// Image URLs in display order.
    pub images: Vec<String>,

    /// Units left. Never negative.
    pub stock: i64,

    /// Owning seller's user id.
    pub seller_id: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Listed and purchasable.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }

    #[inline]
    pub fn is_sold_by(&self, user_id: &str) -> bool {
        self.seller_id == user_id
    }

    /// Removes `quantity` units from stock.
    ///
    /// Flips the status to SOLD exactly when stock reaches zero. Callers
    /// must have checked availability first (see [`crate::order::plan_order`]).
    pub fn reserve_stock(&mut self, quantity: i64) {
        debug_assert!(quantity <= self.stock, "reserving more than in stock");
        self.stock = (self.stock - quantity).max(0);
        if self.stock == 0 {
            self.status = ProductStatus::Sold;
        }
    }

    /// Overwrites the editable listing fields from an input.
    ///
    /// Status, seller and timestamps are not part of the input.
    pub fn apply_input(&mut self, input: &ProductInput) {
        self.title = input.title.clone();
        self.description = input.description.clone();
        self.price_cents = input.price_cents;
        self.category = input.category;
        self.condition = input.condition;
        self.images = input.images.clone();
        self.stock = input.stock;
    }
}

/// Fields a seller supplies when listing or editing a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductInput {
    pub title: String,
    pub description: String,
    #[serde(rename = "price", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub price_cents: i64,
    pub category: ProductCategory,
    pub condition: ProductCondition,
    #[serde(default)]
    pub images: Vec<String>,
    pub stock: i64,
}

// =============================================================================
// Order
// =============================================================================

/// A line in an order.
///
/// Uses the snapshot pattern: `price_cents` is unit price × quantity frozen
/// at order time and is never recomputed from the live product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    /// Line subtotal in cents (snapshot). Dollars on the wire as `price`.
    #[serde(rename = "price", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub price_cents: i64,
}

impl OrderItem {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A purchase placed by a buyer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub items: Vec<OrderItem>,
    /// Sum of item subtotals at creation time. Dollars on the wire as `totalPrice`.
    #[serde(rename = "totalPrice", with = "crate::money::dollars")]
    #[ts(type = "number")]
    pub total_price_cents: i64,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }

    #[inline]
    pub fn is_placed_by(&self, user_id: &str) -> bool {
        self.buyer_id == user_id
    }
}

/// One requested line of a `createOrder` call.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderItemInput {
    pub product_id: String,
    pub quantity: i64,
}

// =============================================================================
// Review
// =============================================================================

/// A buyer's rating of a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    /// 1..=5
    pub rating: u8,
    pub comment: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReviewInput {
    pub product_id: String,
    pub rating: i64,
    pub comment: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
