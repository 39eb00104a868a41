//! `GET /lookup`: relays the external product search.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiResult;
use crate::routes::BarcodeQuery;
use crate::services::lookup::{lookup_product, ProductSearch};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/lookup", get(lookup))
}

async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<BarcodeQuery>,
) -> ApiResult<Json<ProductSearch>> {
    let raw = query.value().unwrap_or_default();
    let search = lookup_product(state.lookup.as_ref(), raw).await?;
    Ok(Json(search))
}
