//! Product lookup against the external UPC database.
//!
//! ## Status Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  barcode missing / < 3 chars  ──► InvalidBarcode   (400)               │
//! │  api key unset / placeholder  ──► NotConfigured    (500)               │
//! │                                                                         │
//! │  GET {base_url}/search/?query=<barcode>                                │
//! │  Authorization: Bearer <key>                                           │
//! │       │                                                                 │
//! │       ├── 2xx  ──► ProductSearch { items: [...] }                      │
//! │       ├── 403  ──► Unauthorized     (403)                              │
//! │       ├── 404  ──► NotFound         (404)                              │
//! │       ├── other──► UpstreamError    (500)                              │
//! │       └── I/O  ──► Transport        (500)                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use buyback_core::validation::validate_lookup_query;
use buyback_core::ValidationError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::LookupSettings;

// =============================================================================
// Payloads
// =============================================================================

/// One product record from the upstream search.
///
/// Fields the counter doesn't use are kept in `extra` so the payload can be
/// relayed unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Upstream search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSearch {
    #[serde(default)]
    pub items: Vec<Product>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductSearch {
    /// The first match, if any.
    pub fn first(&self) -> Option<&Product> {
        self.items.first()
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Why a lookup produced no product list.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    InvalidBarcode(#[from] ValidationError),

    #[error("product lookup API key is not configured")]
    NotConfigured,

    #[error("product database rejected the API key")]
    Unauthorized,

    #[error("no products found")]
    NotFound,

    #[error("product database returned status {status}")]
    UpstreamError { status: u16 },

    #[error("product database request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Transport(err.to_string())
    }
}

pub type LookupResult<T> = Result<T, LookupError>;

// =============================================================================
// Lookup Trait
// =============================================================================

/// A product database.
///
/// `search` receives an already-validated, trimmed barcode.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn search(&self, barcode: &str) -> LookupResult<ProductSearch>;
}

/// Validates `raw` and searches for it.
///
/// Both the lookup route and the evaluation flow go through here, so no
/// backend ever sees an empty or too-short query.
pub async fn lookup_product(lookup: &dyn ProductLookup, raw: &str) -> LookupResult<ProductSearch> {
    let barcode = validate_lookup_query(raw)?;
    lookup.search(barcode).await
}

// =============================================================================
// UPC Database Client
// =============================================================================

/// HTTP client for `api.upcdatabase.org` (or a compatible base URL).
#[derive(Debug, Clone)]
pub struct UpcDatabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl UpcDatabaseClient {
    pub fn new(settings: &LookupSettings) -> LookupResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;

        Ok(UpcDatabaseClient::with_client(http, settings))
    }

    /// Uses a caller-built HTTP client (timeouts and proxies are the caller's).
    pub fn with_client(http: reqwest::Client, settings: &LookupSettings) -> Self {
        UpcDatabaseClient {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key().map(str::to_string),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ProductLookup for UpcDatabaseClient {
    async fn search(&self, barcode: &str) -> LookupResult<ProductSearch> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(LookupError::NotConfigured);
        };

        debug!(barcode, "Searching product database");

        let response = self
            .http
            .get(format!("{}/search/", self.base_url))
            .query(&[("query", barcode)])
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| {
                warn!(barcode, error = %e, "Product database unreachable");
                LookupError::from(e)
            })?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<ProductSearch>().await?),
            StatusCode::FORBIDDEN => Err(LookupError::Unauthorized),
            StatusCode::NOT_FOUND => Err(LookupError::NotFound),
            status => {
                warn!(barcode, status = status.as_u16(), "Product database request failed");
                Err(LookupError::UpstreamError {
                    status: status.as_u16(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relays_unknown_fields() {
        let json = r#"{"success":true,"items":[{"title":"Widget","barcode":"0123","brand":"Acme"}]}"#;
        let search: ProductSearch = serde_json::from_str(json).unwrap();

        let product = search.first().unwrap();
        assert_eq!(product.title.as_deref(), Some("Widget"));
        assert_eq!(product.extra.get("brand"), Some(&Value::from("Acme")));
        assert_eq!(search.extra.get("success"), Some(&Value::Bool(true)));

        let relayed: Value = serde_json::to_value(&search).unwrap();
        assert_eq!(relayed["items"][0]["brand"], "Acme");
    }

    #[test]
    fn test_missing_items_is_empty() {
        let search: ProductSearch = serde_json::from_str("{}").unwrap();
        assert!(search.first().is_none());
    }

    #[tokio::test]
    async fn test_client_without_key_is_not_configured() {
        let client = UpcDatabaseClient::new(&LookupSettings::default()).unwrap();
        assert!(!client.is_configured());

        let err = client.search("0123").await.unwrap_err();
        assert!(matches!(err, LookupError::NotConfigured));
    }
}
