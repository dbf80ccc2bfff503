//! # API Error Type
//!
//! Unified error type for every operation.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bazaar                                 │
//! │                                                                         │
//! │  SPA                         Rust Backend                               │
//! │  ───                         ────────────                               │
//! │                                                                         │
//! │  POST /graphql { operationName: "createOrder", ... }                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Resolver                                                        │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  No caller? ──────── ApiError::unauthenticated() ───┐            │  │
//! │  │         │                                           │            │  │
//! │  │         ▼                                           ▼            │  │
//! │  │  Not the owner? ──── ApiError::forbidden(..) ─── ApiError ─────►│  │
//! │  │         │                                           ▲            │  │
//! │  │         ▼                                           │            │  │
//! │  │  CoreError / StoreError / ValidationError ──────────┘            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── 200 { "data": null,                                              │
//! │              "errors": [{ "message": "Insufficient stock for Sofa",     │
//! │                           "code": "BAD_USER_INPUT" }] }                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::error;

use bazaar_core::{CoreError, ValidationError};
use bazaar_store::StoreError;

/// Error returned from an operation.
///
/// ## Serialization
/// One entry of the response's `errors` array:
/// ```json
/// {
///   "message": "Product not found",
///   "code": "BAD_USER_INPUT"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Human-readable, stable message
    pub message: String,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or semantically invalid request data, or a missing entity
    BadUserInput,

    /// No valid caller identity where one is required
    Unauthenticated,

    /// Valid identity without the rights for this operation
    Forbidden,

    /// Anything the client cannot fix
    InternalServerError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            code,
        }
    }

    /// Creates an input error.
    pub fn bad_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadUserInput, message)
    }

    /// The error every identity-requiring operation raises for anonymous callers.
    pub fn unauthenticated() -> Self {
        ApiError::new(ErrorCode::Unauthenticated, "Not authenticated")
    }

    /// Same message for unknown email and wrong password.
    pub fn invalid_credentials() -> Self {
        ApiError::new(ErrorCode::Unauthenticated, "Invalid credentials")
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Forbidden, message)
    }

    /// Logs `detail` and returns a generic internal error.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "Internal error");
        ApiError::new(ErrorCode::InternalServerError, "Internal server error")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Conversions
// =============================================================================

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::bad_input(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_input(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, .. } => {
                ApiError::bad_input(format!("{entity} not found"))
            }
            StoreError::Duplicate { field, .. } if field == "email" => {
                ApiError::bad_input("Email already in use")
            }
            StoreError::Duplicate { field, .. } if field == "review" => {
                ApiError::bad_input("You have already reviewed this product")
            }
            other => ApiError::bad_input(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
