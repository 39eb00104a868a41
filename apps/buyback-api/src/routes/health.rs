//! `GET /health`: liveness plus optional database check.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    /// Absent when no database is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<bool>,
    pub server_time: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match &state.database {
        Some(db) => Some(db.health_check().await),
        None => None,
    };

    Json(HealthResponse {
        status: "ok",
        database,
        server_time: Utc::now().to_rfc3339(),
    })
}
