//! # Validation Module
//!
//! Input validation utilities for the buyback counter.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Display layer                                                │
//! │  ├── Trims input, disables submit on empty                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler / Pricing Engine (Rust)                         │
//! │  └── THIS MODULE: barcode and count rules                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite mirror                                                │
//! │  └── CHECK (count >= 0)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MIN_LOOKUP_QUERY_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a barcode and returns the trimmed value.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must not be empty after trimming
/// - No checksum or symbology rules
///
/// ## Example
/// ```rust
/// use buyback_core::validation::validate_barcode;
///
/// assert_eq!(validate_barcode(" 0123 ").unwrap(), "0123");
/// assert!(validate_barcode("").is_err());
/// ```
pub fn validate_barcode(raw: &str) -> ValidationResult<&str> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    Ok(trimmed)
}

/// Validates a barcode for the external product lookup.
///
/// ## Rules
/// - Everything [`validate_barcode`] checks
/// - At least [`MIN_LOOKUP_QUERY_LENGTH`] characters
pub fn validate_lookup_query(raw: &str) -> ValidationResult<&str> {
    let trimmed = validate_barcode(raw)?;

    if trimmed.chars().count() < MIN_LOOKUP_QUERY_LENGTH {
        return Err(ValidationError::TooShort {
            field: "barcode".to_string(),
            min: MIN_LOOKUP_QUERY_LENGTH,
        });
    }

    Ok(trimmed)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an inventory count supplied as a signed integer.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Admin: Set Count                                                       │
/// │                                                                         │
/// │  PUT /admin/inventory/0123 { "count": -1 }                              │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_count(-1) ← THIS FUNCTION                                    │
/// │       │                                                                 │
/// │       ├── count < 0? → Error, store untouched                          │
/// │       │                                                                 │
/// │       └── OK → u64 written to the store                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_count(count: i64) -> ValidationResult<u64> {
    u64::try_from(count).map_err(|_| ValidationError::MustBeNonNegative {
        field: "count".to_string(),
        value: count,
    })
}

/// Converts a count to the signed form SQLite stores.
pub fn storable_count(count: u64) -> ValidationResult<i64> {
    i64::try_from(count).map_err(|_| ValidationError::OutOfRange {
        field: "count".to_string(),
        value: count,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_barcode() {
        assert_eq!(validate_barcode("123456789012").unwrap(), "123456789012");
        assert_eq!(validate_barcode("  42 ").unwrap(), "42");

        assert!(validate_barcode("").is_err());
        assert!(validate_barcode(" \t ").is_err());
    }

    #[test]
    fn test_validate_lookup_query() {
        assert!(validate_lookup_query("123").is_ok());
        assert!(matches!(
            validate_lookup_query("12"),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
        assert!(matches!(
            validate_lookup_query(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_count() {
        assert_eq!(validate_count(0).unwrap(), 0);
        assert_eq!(validate_count(31).unwrap(), 31);
        assert!(matches!(
            validate_count(-1),
            Err(ValidationError::MustBeNonNegative { value: -1, .. })
        ));
    }

    #[test]
    fn test_storable_count() {
        assert_eq!(storable_count(35).unwrap(), 35);
        assert_eq!(storable_count(i64::MAX as u64).unwrap(), i64::MAX);
        assert!(matches!(
            storable_count(u64::MAX),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
