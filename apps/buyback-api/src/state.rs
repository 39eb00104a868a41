//! Shared application state handed to every handler.

use std::sync::Arc;

use buyback_core::PricingEngine;
use buyback_db::Database;

use crate::services::evaluation::EvaluationService;
use crate::services::inventory::InventoryService;
use crate::services::lookup::ProductLookup;

/// Shared application state.
///
/// Every field is a cheap handle; axum clones the state per request.
#[derive(Clone)]
pub struct AppState {
    pub inventory: InventoryService,
    pub engine: Arc<PricingEngine>,
    pub lookup: Arc<dyn ProductLookup>,
    pub evaluation: EvaluationService,
    pub database: Option<Database>,
    pub admin_enabled: bool,
}

impl AppState {
    pub fn new(
        inventory: InventoryService,
        engine: PricingEngine,
        lookup: Arc<dyn ProductLookup>,
    ) -> Self {
        let engine = Arc::new(engine);
        let evaluation = EvaluationService::new(lookup.clone(), inventory.clone(), engine.clone());

        AppState {
            inventory,
            engine,
            lookup,
            evaluation,
            database: None,
            admin_enabled: false,
        }
    }

    /// Reports database health on `/health`.
    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Mounts `/admin/inventory`.
    pub fn with_admin(mut self, enabled: bool) -> Self {
        self.admin_enabled = enabled;
        self
    }
}
