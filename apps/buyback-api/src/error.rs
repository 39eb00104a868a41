//! Error types for the Buyback API.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CoreError / LookupError / EvaluationError                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError { status, code, message }                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HTTP 4xx/5xx  { "error": "<message>", "code": "<CODE>" }              │
//! │                                                                         │
//! │  Upstream lookup failures are logged in full and answered with a       │
//! │  generic message.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use buyback_core::{CoreError, ValidationError};
use serde::Serialize;

use crate::services::evaluation::EvaluationError;
use crate::services::lookup::LookupError;

/// An error as HTTP clients see it.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, code, message)
    }

    /// The query string had no usable barcode.
    pub fn missing_barcode() -> Self {
        ApiError::bad_request("MISSING_BARCODE", "UPC code is required")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            code: self.code,
        });

        (self.status, body).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request("INVALID_ARGUMENT", err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidArgument(inner) => inner.into(),
        }
    }
}

/// ## Status Mapping
/// ```text
/// InvalidBarcode(Required)   → 400 "UPC code is required"
/// InvalidBarcode(TooShort)   → 400 "UPC code must be at least 3 characters"
/// NotConfigured              → 500 "API key not configured"
/// Unauthorized               → 403 "Invalid API key"
/// NotFound                   → 404 "No products found for this UPC code"
/// UpstreamError / Transport  → 500 "Failed to lookup UPC code"
/// ```
impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::InvalidBarcode(ValidationError::TooShort { min, .. }) => ApiError::bad_request(
                "BARCODE_TOO_SHORT",
                format!("UPC code must be at least {min} characters"),
            ),
            LookupError::InvalidBarcode(_) => ApiError::missing_barcode(),
            LookupError::NotConfigured => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "LOOKUP_NOT_CONFIGURED",
                "API key not configured",
            ),
            LookupError::Unauthorized => {
                ApiError::new(StatusCode::FORBIDDEN, "LOOKUP_UNAUTHORIZED", "Invalid API key")
            }
            LookupError::NotFound => ApiError::new(
                StatusCode::NOT_FOUND,
                "PRODUCT_NOT_FOUND",
                "No products found for this UPC code",
            ),
            LookupError::UpstreamError { .. } | LookupError::Transport(_) => {
                tracing::error!(error = %err, "UPC lookup error");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LOOKUP_FAILED",
                    "Failed to lookup UPC code",
                )
            }
        }
    }
}

impl From<EvaluationError> for ApiError {
    fn from(err: EvaluationError) -> Self {
        match err {
            EvaluationError::Lookup(inner) => inner.into(),
            EvaluationError::NoProduct => ApiError::new(
                StatusCode::NOT_FOUND,
                "PRODUCT_NOT_FOUND",
                "No product found with this UPC code",
            ),
            EvaluationError::Pricing(inner) => inner.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
