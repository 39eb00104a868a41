//! # Error Types
//!
//! Domain-specific error types for buyback-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  buyback-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  buyback-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  buyback-api errors (in app)                                           │
//! │  ├── LookupError      - Product database failures                      │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP 400               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not an error: NOT_ACCEPTING
//! A quote in the `NOT_ACCEPTING` tier is a valid pricing outcome. It is
//! returned as a `PriceQuote`, never as a `CoreError`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The pricing core performs no I/O, so nothing here is transient. Every
/// variant is reported to the immediate caller and never retried.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed input: empty barcode, negative count, bad tier table.
    ///
    /// ## User Workflow
    /// ```text
    /// GET /pricing?barcode=
    ///      │
    ///      ▼
    /// Barcode::parse("") → ValidationError::Required
    ///      │
    ///      ▼
    /// CoreError::InvalidArgument
    ///      │
    ///      ▼
    /// HTTP 400 { "error": "barcode is required" }
    /// ```
    #[error("{0}")]
    InvalidArgument(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Value must be zero or greater.
    #[error("{field} must not be negative (got {value})")]
    MustBeNonNegative { field: String, value: i64 },

    /// Value does not fit the stored representation.
    #[error("{field} is too large (got {value})")]
    OutOfRange { field: String, value: u64 },

    /// A tier table violates its ordering rules.
    #[error("invalid tier table: {reason}")]
    InvalidTierTable { reason: String },
}

impl ValidationError {
    /// Shorthand for a tier-table rule violation.
    pub fn tier_table(reason: impl Into<String>) -> Self {
        ValidationError::InvalidTierTable {
            reason: reason.into(),
        }
    }
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
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "barcode".to_string(),
        };
        assert_eq!(err.to_string(), "barcode is required");

        let err = ValidationError::MustBeNonNegative {
            field: "count".to_string(),
            value: -1,
        };
        assert_eq!(err.to_string(), "count must not be negative (got -1)");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "barcode".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::InvalidArgument(_)));
        assert_eq!(core_err.to_string(), "barcode is required");
    }
}
