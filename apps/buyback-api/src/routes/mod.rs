//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET  /health                                  health::routes          │
//! │  GET  /pricing?barcode=<id>                    pricing::routes         │
//! │  GET  /lookup?barcode=<id>                     lookup::routes          │
//! │  GET  /evaluate?barcode=<id>                   evaluate::routes        │
//! │                                                                         │
//! │  admin.enabled only:                                                   │
//! │  GET  /admin/inventory                         admin::routes           │
//! │  POST /admin/inventory/{barcode}/increment                             │
//! │  PUT  /admin/inventory/{barcode}   { "count": 12 }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `upc` is accepted as an alias for the `barcode` query parameter.

use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

pub mod admin;
pub mod evaluate;
pub mod health;
pub mod lookup;
pub mod pricing;

/// `?barcode=<id>` or `?upc=<id>`.
#[derive(Debug, Default, Deserialize)]
pub struct BarcodeQuery {
    pub barcode: Option<String>,
    pub upc: Option<String>,
}

impl BarcodeQuery {
    /// The first non-blank value, `barcode` before `upc`.
    pub fn value(&self) -> Option<&str> {
        [&self.barcode, &self.upc]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|v| !v.trim().is_empty())
    }

    /// Like [`value`](Self::value) but answers 400 when absent.
    pub fn require(&self) -> ApiResult<&str> {
        self.value().ok_or_else(ApiError::missing_barcode)
    }
}
