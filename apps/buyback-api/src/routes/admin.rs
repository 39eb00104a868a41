//! `/admin/inventory`: stock maintenance, mounted only when `admin.enabled`.

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use buyback_core::pricing::PricedEntry;
use buyback_core::{Barcode, InventoryEntry};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiResult;
use crate::routes::pricing::PricingResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetCountRequest {
    pub count: i64,
}

/// One listing row. `pricing` has the same shape as a `/pricing` answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryPricingResponse {
    pub barcode: Barcode,
    pub count: u64,
    pub pricing: PricingResponse,
}

impl From<PricedEntry> for InventoryPricingResponse {
    fn from(entry: PricedEntry) -> Self {
        InventoryPricingResponse {
            barcode: entry.barcode,
            count: entry.count,
            pricing: entry.pricing.into(),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/inventory", get(list_inventory))
        .route("/admin/inventory/{barcode}", put(set_count))
        .route("/admin/inventory/{barcode}/increment", post(increment))
}

/// Every stocked barcode with its current offer.
async fn list_inventory(State(state): State<AppState>) -> Json<Vec<InventoryPricingResponse>> {
    let entries = state.engine.price_all(state.inventory.store());
    Json(entries.into_iter().map(Into::into).collect())
}

async fn increment(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> ApiResult<Json<InventoryEntry>> {
    let barcode = Barcode::parse(&barcode)?;
    let count = state.inventory.increment(&barcode).await;

    info!(barcode = %barcode, count, "Stock received");
    Ok(Json(InventoryEntry { barcode, count }))
}

async fn set_count(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
    Json(body): Json<SetCountRequest>,
) -> ApiResult<Json<InventoryEntry>> {
    let barcode = Barcode::parse(&barcode)?;
    let count = state.inventory.set_count(&barcode, body.count).await?;

    info!(barcode = %barcode, count, "Stock level set");
    Ok(Json(InventoryEntry { barcode, count }))
}
