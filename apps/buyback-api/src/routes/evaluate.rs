//! `GET /evaluate`: lookup then pricing in one call.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::ApiResult;
use crate::routes::pricing::PricingResponse;
use crate::routes::BarcodeQuery;
use crate::services::lookup::Product;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub product: Product,
    pub pricing: PricingResponse,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/evaluate", get(evaluate))
}

async fn evaluate(
    State(state): State<AppState>,
    Query(query): Query<BarcodeQuery>,
) -> ApiResult<Json<EvaluateResponse>> {
    let raw = query.value().unwrap_or_default();
    let evaluation = state.evaluation.evaluate(raw).await?;

    Ok(Json(EvaluateResponse {
        product: evaluation.product,
        pricing: evaluation.pricing.into(),
    }))
}
