//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                        │
//! │  ├── CoreError        - Marketplace rule violations                    │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  bazaar-store errors (separate crate)                                  │
//! │  └── StoreError       - Missing entities, duplicates                   │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What the client sees (message + code)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → GraphQL envelope       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Messages are stable: clients and tests match on them
//! 3. Errors are enum variants, never String
//! 4. Every variant here is a client error (maps to BAD_USER_INPUT)

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent marketplace rule violations detected while
/// planning an order or serving a catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A referenced product does not exist.
    #[error("Product {0} not found")]
    ProductNotFound(String),

    /// Requested quantity exceeds what is left in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// createOrder([{ productId: SOFA, quantity: 5 }])
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { title: "Leather Sofa", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Client shows: "Insufficient stock for Leather Sofa"
    /// ```
    #[error("Insufficient stock for {title}")]
    InsufficientStock {
        title: String,
        available: i64,
        requested: i64,
    },

    /// Product exists but is SOLD or INACTIVE.
    #[error("Product {title} is not available")]
    ProductNotAvailable { title: String },

    /// An order was submitted without line items.
    #[error("Order must contain at least one item")]
    EmptyOrder,

    /// Line subtotals or the order total do not fit in an `i64` of cents.
    #[error("Order total is too large")]
    TotalOverflow,

    /// Page or limit below 1.
    #[error("Page and limit must be positive numbers")]
    InvalidPage,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a single field doesn't meet requirements.
/// Resolvers run validators eagerly and stop at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must be non-negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("Invalid {field} format")]
    InvalidFormat { field: String },

    /// Value is not in the allowed set for this operation.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            title: "Leather Sofa".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(err.to_string(), "Insufficient stock for Leather Sofa");

        let err = CoreError::ProductNotAvailable {
            title: "Yoga Mat".to_string(),
        };
        assert_eq!(err.to_string(), "Product Yoga Mat is not available");

        assert_eq!(CoreError::TotalOverflow.to_string(), "Order total is too large");

        assert_eq!(
            CoreError::InvalidPage.to_string(),
            "Page and limit must be positive numbers"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::TooShort {
            field: "Password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "Password must be at least 6 characters");

        let err = ValidationError::InvalidFormat {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid email format");

        let err = ValidationError::MustBeNonNegative {
            field: "Stock".to_string(),
        };
        assert_eq!(err.to_string(), "Stock must be non-negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "Name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Name is required");
    }
}
