//! # Domain Types
//!
//! The barcode identifier shared by every component.
//!
//! ## Where Barcodes Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Camera ──► BarcodeDecoder ──┐                                          │
//! │                              ├──► Barcode::parse ──► store / engine     │
//! │  Keyboard ("  0123 ") ───────┘        │                                 │
//! │                                       └── trims, rejects empty          │
//! │                                                                         │
//! │  No checksum validation: EAN-13, UPC-A, CODE-128 payloads and           │
//! │  shop-local codes are all accepted as opaque keys.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{validate_barcode, ValidationResult};

// =============================================================================
// Barcode
// =============================================================================

/// An opaque product identifier, typically 8-14 digits.
///
/// ## Invariant
/// The wrapped string is trimmed and non-empty. The only way to build one is
/// [`Barcode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export)]
pub struct Barcode(String);

impl Barcode {
    /// Validates and normalizes raw input.
    ///
    /// ## Example
    /// ```rust
    /// use buyback_core::Barcode;
    ///
    /// let barcode = Barcode::parse(" 987654321098 ").unwrap();
    /// assert_eq!(barcode.as_str(), "987654321098");
    ///
    /// assert!(Barcode::parse("").is_err());
    /// assert!(Barcode::parse("   ").is_err());
    /// ```
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let trimmed = validate_barcode(raw)?;
        Ok(Barcode(trimmed.to_string()))
    }

    /// Returns the barcode as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Barcode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Barcode::parse(&value)
    }
}

impl From<Barcode> for String {
    fn from(barcode: Barcode) -> Self {
        barcode.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let barcode = Barcode::parse("\t123456789012\n").unwrap();
        assert_eq!(barcode.as_str(), "123456789012");
        assert_eq!(barcode.to_string(), "123456789012");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            Barcode::parse(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(Barcode::parse("  ").is_err());
    }

    #[test]
    fn test_accepts_non_numeric_keys() {
        // No symbology rules are applied by the pricing core.
        assert!(Barcode::parse("ABC-1").is_ok());
        assert!(Barcode::parse("7").is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Barcode = serde_json::from_str("\"0123\"").unwrap();
        assert_eq!(ok.as_str(), "0123");

        let err = serde_json::from_str::<Barcode>("\"\"");
        assert!(err.is_err());
    }
}
