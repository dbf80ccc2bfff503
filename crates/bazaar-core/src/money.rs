//! # Money Module
//!
//! Provides the `Money` type for handling prices and order totals safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing line items as floats:                                          │
//! │    319.98 + 79.99 = 399.96999999999997  ❌ WRONG!                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    31998 + 7999 = 39997 cents = $399.97                                │
//! │    Order totals are exact sums of item subtotals                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::money::Money;
//!
//! let price = Money::from_cents(7999); // $79.99
//!
//! let doubled = price * 2;                       // $159.98
//! let total = price + Money::from_cents(500);    // $84.99
//! assert_eq!(doubled.cents(), 15998);
//! assert_eq!(total.cents(), 8499);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.price_cents ──► OrderItem.price_cents (unit × qty, frozen)    │
/// │                                   │                                     │
/// │                                   ▼                                     │
/// │                          Order.total_price_cents (Σ items)             │
/// │                                                                         │
/// │  ProductFilter.min/max_price_cents compare against Product.price       │
/// │  On the wire all of these are dollars (`price`, `totalPrice`, ...)     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::from_cents(99999); // Represents $999.99
    /// assert_eq!(price.cents(), 99999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(1200, 0).cents(), 120000);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Saturates instead of overflowing. Order planning uses
    /// [`Money::checked_multiply_quantity`] so a saturated amount is never stored.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Unit price × quantity, or `None` if the result does not fit.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sum of two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde adapter for cent amounts that travel as decimal dollars.
///
/// ```text
///   JSON  "price": 999.99   ◄──►   price_cents: 99999
/// ```
///
/// Deserializing rounds to the nearest cent and rejects amounts an `f64`
/// cannot carry exactly. Use as `#[serde(with = "crate::money::dollars")]`,
/// or `dollars::option` for optional fields.
pub mod dollars {
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// 2^53: above this, not every whole number of cents is representable.
    const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_992.0;

    /// Cents → dollars.
    pub fn to_dollars(cents: i64) -> f64 {
        cents as f64 / 100.0
    }

    /// Dollars → cents, rounded. `None` when out of range or not finite.
    pub fn from_dollars(dollars: f64) -> Option<i64> {
        let cents = (dollars * 100.0).round();
        if !cents.is_finite() || cents.abs() > MAX_EXACT_CENTS {
            return None;
        }
        Some(cents as i64)
    }

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(to_dollars(*cents))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        from_dollars(dollars)
            .ok_or_else(|| de::Error::custom(format!("amount {dollars} is out of range")))
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            cents: &Option<i64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match cents {
                Some(cents) => super::serialize(cents, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<i64>, D::Error> {
            let dollars = Option::<f64>::deserialize(deserializer)?;
            dollars
                .map(|d| {
                    super::from_dollars(d).ok_or_else(|| {
                        serde::de::Error::custom(format!("amount {d} is out of range"))
                    })
                })
                .transpose()
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$D.CC` (debugging and log output only).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
