//! `UpcDatabaseClient` against a local stub of the product database.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use buyback_api::config::LookupSettings;
use buyback_api::services::inventory::InventoryService;
use buyback_api::services::lookup::{LookupError, ProductLookup, UpcDatabaseClient};
use buyback_api::{app, AppState};
use buyback_core::PricingEngine;
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceExt;

const API_KEY: &str = "test-key";

/// Mimics the upstream: the query value selects the status code.
async fn search(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {API_KEY}"));
    if !authorized {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": "forbidden" })));
    }

    let query = params.get("query").cloned().unwrap_or_default();
    match query.as_str() {
        "40404" => (StatusCode::NOT_FOUND, Json(json!({ "error": "none" }))),
        "50000" => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": "down" }))),
        _ => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "items": [{ "title": "Desk Lamp", "barcode": query, "brand": "Acme" }]
            })),
        ),
    }
}

async fn spawn_upstream() -> String {
    let app = Router::new().route("/search/", get(search));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn client(base_url: &str, api_key: &str) -> UpcDatabaseClient {
    let settings = LookupSettings {
        base_url: format!("{base_url}/"),
        api_key: api_key.to_string(),
        timeout_secs: 5,
    };
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    UpcDatabaseClient::with_client(http, &settings)
}

#[tokio::test]
async fn success_relays_items() {
    let base = spawn_upstream().await;

    let search = client(&base, API_KEY).search("0123456").await.unwrap();
    let product = search.first().unwrap();

    assert_eq!(product.title.as_deref(), Some("Desk Lamp"));
    assert_eq!(product.barcode.as_deref(), Some("0123456"));
    assert_eq!(product.extra["brand"], "Acme");
}

#[tokio::test]
async fn upstream_statuses_are_mapped() {
    let base = spawn_upstream().await;

    let err = client(&base, "wrong-key").search("0123456").await.unwrap_err();
    assert!(matches!(err, LookupError::Unauthorized));

    let err = client(&base, API_KEY).search("40404").await.unwrap_err();
    assert!(matches!(err, LookupError::NotFound));

    let err = client(&base, API_KEY).search("50000").await.unwrap_err();
    assert!(matches!(err, LookupError::UpstreamError { status: 503 }));
}

#[tokio::test]
async fn placeholder_key_is_not_configured() {
    let base = spawn_upstream().await;

    let err = client(&base, "your_api_key_here")
        .search("0123456")
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::NotConfigured));
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"), API_KEY)
        .search("0123456")
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Transport(_)));
}

#[tokio::test]
async fn lookup_route_maps_upstream_forbidden() {
    let base = spawn_upstream().await;

    let state = AppState::new(
        InventoryService::in_memory(),
        PricingEngine::standard(),
        Arc::new(client(&base, "wrong-key")),
    );
    let response = app(state)
        .oneshot(
            axum::http::Request::builder()
                .uri("/lookup?upc=0123456")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Invalid API key");
}
