//! `GET /pricing`: the buy-back offer for one barcode.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use buyback_core::pricing::TierName;
use buyback_core::PriceQuote;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::routes::BarcodeQuery;
use crate::state::AppState;

/// Wire shape of a quote.
///
/// ```json
/// { "price": 5.0, "currentCount": 10, "tier": "MEDIUM_DEMAND",
///   "reason": "Good seller (10 in stock)" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub price: f64,
    pub current_count: u64,
    pub tier: TierName,
    pub reason: String,
}

impl From<PriceQuote> for PricingResponse {
    fn from(quote: PriceQuote) -> Self {
        PricingResponse {
            price: quote.price.as_decimal(),
            current_count: quote.count,
            tier: quote.tier,
            reason: quote.reason,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/pricing", get(pricing))
}

async fn pricing(
    State(state): State<AppState>,
    Query(query): Query<BarcodeQuery>,
) -> ApiResult<Json<PricingResponse>> {
    let raw = query.require()?;
    let quote = state.engine.quote(state.inventory.store(), raw)?;

    debug!(
        barcode = %quote.barcode,
        count = quote.count,
        tier = %quote.tier,
        "Quoted"
    );

    Ok(Json(quote.into()))
}
