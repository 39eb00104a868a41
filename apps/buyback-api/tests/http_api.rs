//! Router-level tests: requests go through the full axum stack without a
//! socket, with the product database replaced by an in-process stub.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use buyback_api::services::inventory::InventoryService;
use buyback_api::services::lookup::{
    LookupError, LookupResult, Product, ProductLookup, ProductSearch,
};
use buyback_api::{app, AppState};
use buyback_core::money::Money;
use buyback_core::pricing::{PricingTier, TierBound, TierName, TierTable};
use buyback_core::PricingEngine;
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Fixtures
// =============================================================================

/// Answers by barcode: "40404" → NotFound, "00000" → empty list,
/// anything else → one product titled after the barcode.
struct StubLookup;

#[async_trait]
impl ProductLookup for StubLookup {
    async fn search(&self, barcode: &str) -> LookupResult<ProductSearch> {
        match barcode {
            "40404" => Err(LookupError::NotFound),
            "00000" => Ok(ProductSearch::default()),
            _ => Ok(ProductSearch {
                items: vec![Product {
                    title: Some(format!("Item {barcode}")),
                    barcode: Some(barcode.to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            }),
        }
    }
}

async fn test_app(engine: PricingEngine, admin: bool) -> (Router, InventoryService) {
    let inventory = InventoryService::in_memory();
    inventory.seed_demo().await.unwrap();

    let state = AppState::new(inventory.clone(), engine, Arc::new(StubLookup)).with_admin(admin);
    (app(state), inventory)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

// =============================================================================
// Pricing
// =============================================================================

#[tokio::test]
async fn pricing_without_barcode_is_bad_request() {
    let (app, _) = test_app(PricingEngine::standard(), false).await;

    for uri in ["/pricing", "/pricing?barcode=", "/pricing?barcode=%20%20"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "UPC code is required");
        assert_eq!(body["code"], "MISSING_BARCODE");
    }
}

#[tokio::test]
async fn pricing_returns_quote_for_each_demo_tier() {
    let (app, _) = test_app(PricingEngine::standard(), false).await;

    let cases = [
        ("123456789012", 5.0, 2, "HIGH_DEMAND", "High demand item (2 in stock)"),
        ("987654321098", 5.0, 10, "MEDIUM_DEMAND", "Good seller (10 in stock)"),
        ("456789012345", 3.0, 20, "LOW_DEMAND", "Limited demand (20 in stock)"),
        ("789012345678", 1.0, 35, "OVERSUPPLIED", "Overstocked (35 in stock)"),
    ];

    for (barcode, price, count, tier, reason) in cases {
        let (status, body) = get(&app, &format!("/pricing?barcode={barcode}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "price": price, "currentCount": count, "tier": tier, "reason": reason })
        );
    }
}

#[tokio::test]
async fn pricing_accepts_upc_alias_and_unknown_barcodes() {
    let (app, _) = test_app(PricingEngine::standard(), false).await;

    let (status, body) = get(&app, "/pricing?upc=555000111222").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "HIGH_DEMAND");
    assert_eq!(body["currentCount"], 0);
    assert_eq!(body["reason"], "High demand item (0 in stock)");
}

#[tokio::test]
async fn pricing_with_finite_table_can_refuse() {
    let table = TierTable::new(vec![
        PricingTier::new(TierName::HighDemand, TierBound::AtMost(5), Money::from_cents(500)),
        PricingTier::new(TierName::LowDemand, TierBound::AtMost(30), Money::from_cents(300)),
    ])
    .unwrap();
    let (app, _) = test_app(PricingEngine::new(table), false).await;

    let (status, body) = get(&app, "/pricing?barcode=789012345678").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "NOT_ACCEPTING");
    assert_eq!(body["price"], 0.5);
    assert_eq!(body["reason"], "We are not currently accepting this item");
}

// =============================================================================
// Lookup / Evaluate
// =============================================================================

#[tokio::test]
async fn lookup_validates_before_searching() {
    let (app, _) = test_app(PricingEngine::standard(), false).await;

    let (status, body) = get(&app, "/lookup").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UPC code is required");

    let (status, body) = get(&app, "/lookup?upc=12").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UPC code must be at least 3 characters");
}

#[tokio::test]
async fn lookup_relays_products_and_maps_failures() {
    let (app, _) = test_app(PricingEngine::standard(), false).await;

    let (status, body) = get(&app, "/lookup?barcode=123456789012").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["title"], "Item 123456789012");

    let (status, body) = get(&app, "/lookup?barcode=40404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No products found for this UPC code");
}

#[tokio::test]
async fn evaluate_combines_product_and_pricing() {
    let (app, _) = test_app(PricingEngine::standard(), false).await;

    let (status, body) = get(&app, "/evaluate?barcode=987654321098").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["title"], "Item 987654321098");
    assert_eq!(body["pricing"]["tier"], "MEDIUM_DEMAND");
    assert_eq!(body["pricing"]["currentCount"], 10);
}

#[tokio::test]
async fn evaluate_reports_missing_product() {
    let (app, _) = test_app(PricingEngine::standard(), false).await;

    let (status, body) = get(&app, "/evaluate?barcode=00000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No product found with this UPC code");
}

// =============================================================================
// Admin / Health
// =============================================================================

#[tokio::test]
async fn admin_routes_are_hidden_by_default() {
    let (app, _) = test_app(PricingEngine::standard(), false).await;

    let (status, _) = get(&app, "/admin/inventory").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_increment_moves_item_through_tiers() {
    let (app, inventory) = test_app(PricingEngine::standard(), true).await;

    for expected in 1..=3 {
        let (status, body) = send(
            &app,
            Method::POST,
            "/admin/inventory/246810121416/increment",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "barcode": "246810121416", "count": expected }));
    }

    let (_, body) = get(&app, "/pricing?barcode=246810121416").await;
    assert_eq!(body["currentCount"], 3);
    assert_eq!(body["tier"], "HIGH_DEMAND");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/admin/inventory/246810121416",
        Some(json!({ "count": 31 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 31);

    let (_, body) = get(&app, "/pricing?barcode=246810121416").await;
    assert_eq!(body["tier"], "OVERSUPPLIED");
    assert_eq!(inventory.list_all().len(), 5);
}

#[tokio::test]
async fn admin_rejects_negative_count() {
    let (app, _) = test_app(PricingEngine::standard(), true).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/admin/inventory/123456789012",
        Some(json!({ "count": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ARGUMENT");

    let (_, body) = get(&app, "/pricing?barcode=123456789012").await;
    assert_eq!(body["currentCount"], 2);
}

#[tokio::test]
async fn admin_lists_inventory_with_quotes() {
    let (app, _) = test_app(PricingEngine::standard(), true).await;

    let (status, body) = get(&app, "/admin/inventory").await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["barcode"], "123456789012");
    assert_eq!(entries[0]["pricing"]["tier"], "HIGH_DEMAND");

    // Listing and /pricing agree on units and field names.
    let (_, quote) = get(&app, "/pricing?barcode=123456789012").await;
    assert_eq!(entries[0]["pricing"]["price"], 5.0);
    assert_eq!(entries[0]["pricing"], quote);
    assert_eq!(entries[2]["barcode"], "789012345678");
    assert_eq!(entries[2]["pricing"]["price"], 1.0);
}

#[tokio::test]
async fn health_without_database() {
    let (app, _) = test_app(PricingEngine::standard(), false).await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body.get("database").is_none());
    assert!(body["serverTime"].is_string());
}
