//! # Buyback API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  startup                                                                │
//! │    1. tracing subscriber (RUST_LOG or built-in filter)                 │
//! │    2. AppConfig::load()                                                │
//! │    3. tier table ── invalid? exit                                      │
//! │    4. database.path set? ── open SQLite, hydrate MemoryInventory       │
//! │    5. inventory.seed_demo_data? ── write demo stock                    │
//! │    6. serve until Ctrl+C / SIGTERM                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use buyback_api::services::inventory::InventoryService;
use buyback_api::services::lookup::UpcDatabaseClient;
use buyback_api::{app, AppConfig, AppState};
use buyback_core::{MemoryInventory, PricingEngine};
use buyback_db::migrations::migration_status;
use buyback_db::{Database, DbConfig};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buyback_api=debug,buyback_db=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Buyback API server...");

    let config = AppConfig::load().context("failed to load configuration")?;
    let table = config
        .pricing
        .tier_table()
        .context("invalid pricing configuration")?;
    info!(
        addr = %config.server.bind_address(),
        tiers = table.tiers().len(),
        can_refuse = table.can_refuse(),
        "Configuration loaded"
    );

    // Persistence mirror (optional)
    let database = match config.database.path() {
        Some(path) => Some(
            Database::new(DbConfig::new(path))
                .await
                .context("failed to open inventory database")?,
        ),
        None => {
            info!("No database configured, inventory is in-memory only");
            None
        }
    };

    if let Some(db) = &database {
        let (total, applied) = migration_status(db.pool())
            .await
            .context("failed to read migration status")?;
        info!(total, applied, "Database schema ready");
    }

    let inventory = InventoryService::new(
        Arc::new(MemoryInventory::new()),
        database.as_ref().map(Database::inventory),
    );
    let hydrated = inventory
        .hydrate()
        .await
        .context("failed to load persisted inventory")?;
    info!(barcodes = hydrated, "Inventory ready");

    if config.inventory.seed_demo_data {
        inventory.seed_demo().await?;
    }

    let lookup = UpcDatabaseClient::new(&config.lookup).context("failed to build lookup client")?;
    if !lookup.is_configured() {
        warn!("UPC lookup API key not configured, /lookup and /evaluate will answer 500");
    }

    let mut state = AppState::new(inventory, PricingEngine::new(table), Arc::new(lookup))
        .with_admin(config.admin.enabled);
    if let Some(db) = &database {
        state = state.with_database(db.clone());
    }
    if config.admin.enabled {
        warn!("Admin inventory routes are enabled");
    }

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = database {
        db.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
