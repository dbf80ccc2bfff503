//! # Store Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Repository method (find/insert/update)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← entity + id context                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in API app) ← stable client message + code                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Entity not found.
    ///
    /// ## When This Occurs
    /// - Id doesn't exist
    /// - Entity was removed (e.g. product deleted, review cascaded)
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Uniqueness violation.
    ///
    /// ## When This Occurs
    /// - Registering an email that is already in use
    /// - Second review by the same user on the same product
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
