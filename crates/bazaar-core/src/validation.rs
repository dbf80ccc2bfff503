//! # Validation Module
//!
//! Field-level validation for Bazaar.
//!
//! ## Two Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Predicates (is_valid_*)                                                │
//! │  ├── Pure, total, never fail: &str / i64 → bool                        │
//! │  └── Safe to call from anywhere (UI hints, filters)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Validators (validate_*)                                                │
//! │  ├── Wrap a predicate, translate `false` into a ValidationError        │
//! │  └── Used by resolvers; first failure wins                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::validation::{is_valid_email, validate_rating};
//!
//! assert!(is_valid_email("jane@buyer.com"));
//! assert!(validate_rating(6).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_RATING, MIN_PASSWORD_LENGTH, MIN_RATING};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Predicates
// =============================================================================

/// Email shape check: `local@domain.tld`.
///
/// ## Rules
/// - No whitespace anywhere
/// - Exactly one `@`, with a non-empty local part
/// - The domain contains a `.` that is neither its first nor last character
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// At least [`MIN_PASSWORD_LENGTH`] characters.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Strictly positive price.
pub fn is_valid_price(price_cents: i64) -> bool {
    price_cents > 0
}

/// Zero or more units.
pub fn is_valid_stock(stock: i64) -> bool {
    stock >= 0
}

/// Integer rating in `[1, 5]`.
pub fn is_valid_rating(rating: i64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

// =============================================================================
// String Validators
// =============================================================================

pub fn validate_email(email: &str) -> ValidationResult<()> {
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
        });
    }

    Ok(())
}

pub fn validate_password(password: &str) -> ValidationResult<()> {
    if !is_valid_password(password) {
        return Err(ValidationError::TooShort {
            field: "Password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

/// Display names must contain something other than whitespace.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "Name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

pub fn validate_price_cents(price_cents: i64) -> ValidationResult<()> {
    if !is_valid_price(price_cents) {
        return Err(ValidationError::MustBePositive {
            field: "Price".to_string(),
        });
    }

    Ok(())
}

pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if !is_valid_stock(stock) {
        return Err(ValidationError::MustBeNonNegative {
            field: "Stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a rating and narrows it to its stored width.
pub fn validate_rating(rating: i64) -> ValidationResult<u8> {
    if !is_valid_rating(rating) {
        return Err(ValidationError::OutOfRange {
            field: "Rating".to_string(),
            min: MIN_RATING,
            max: MAX_RATING,
        });
    }

    u8::try_from(rating).map_err(|_| ValidationError::OutOfRange {
        field: "Rating".to_string(),
        min: MIN_RATING,
        max: MAX_RATING,
    })
}

/// Order line quantities must be positive. There is no upper bound; stock
/// is the only limit.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "Quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("john@seller.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(is_valid_email("a@b..c"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@seller.com"));
        assert!(!is_valid_email("john@seller"));
        assert!(!is_valid_email("john@.com"));
        assert!(!is_valid_email("john@seller."));
        assert!(!is_valid_email("jo hn@seller.com"));
        assert!(!is_valid_email("john@@seller.com"));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("password123").is_ok());

        let err = validate_password("12345").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Jane Smith").is_ok());
        assert!(validate_name("").is_err());
        assert_eq!(validate_name("   ").unwrap_err().to_string(), "Name is required");
    }

    #[test]
    fn test_validate_price_and_stock() {
        assert!(validate_price_cents(1).is_ok());
        assert_eq!(
            validate_price_cents(0).unwrap_err().to_string(),
            "Price must be positive"
        );

        assert!(validate_stock(0).is_ok());
        assert_eq!(
            validate_stock(-1).unwrap_err().to_string(),
            "Stock must be non-negative"
        );
    }

    #[test]
    fn test_validate_rating() {
        assert_eq!(validate_rating(1).unwrap(), 1);
        assert_eq!(validate_rating(5).unwrap(), 5);
        assert_eq!(
            validate_rating(0).unwrap_err().to_string(),
            "Rating must be between 1 and 5"
        );
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());

        assert_eq!(
            validate_quantity(0).unwrap_err().to_string(),
            "Quantity must be positive"
        );
        assert!(validate_quantity(-1).is_err());
    }
}
