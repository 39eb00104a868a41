//! # Buyback API
//!
//! HTTP service for the buy-back counter.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Buyback API Services                            │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  Pricing       │  │  Lookup        │  │  Evaluation                ││
//! │  │                │  │                │  │                            ││
//! │  │ • GET /pricing │  │ • GET /lookup  │  │ • GET /evaluate            ││
//! │  │   (engine +    │  │   (UPC DB      │  │   (lookup, then pricing)   ││
//! │  │    inventory)  │  │    proxy)      │  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐                                │
//! │  │  Admin         │  │  Health        │                                │
//! │  │ (opt-in)       │  │                │                                │
//! │  │ • list         │  │ • GET /health  │                                │
//! │  │ • increment    │  │                │                                │
//! │  │ • set count    │  │                │                                │
//! │  └────────────────┘  └────────────────┘                                │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Infrastructure                               │  │
//! │  │  MemoryInventory (authority) ──mirror──► SQLite (optional)       │  │
//! │  │  reqwest ──► UPC product database                                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`]. Environment variables use the `BUYBACK__` prefix, e.g.
//! `BUYBACK__SERVER__PORT=8080`. `UPC_API_KEY` supplies the lookup key.

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports
pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Builds the HTTP router.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(routes::health::routes())
        .merge(routes::pricing::routes())
        .merge(routes::lookup::routes())
        .merge(routes::evaluate::routes());

    if state.admin_enabled {
        router = router.merge(routes::admin::routes());
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
