//! # buyback-db: Persistence Mirror for the Buyback Counter
//!
//! This crate stores inventory counts in SQLite so they survive a restart.
//! It uses sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Buyback Data Flow                                │
//! │                                                                         │
//! │  POST /admin/inventory/{barcode}/increment                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InventoryService ──► MemoryInventory (authority, buyback-core)        │
//! │       │                                                                 │
//! │       │ mirror                                                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    buyback-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories   │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ (inventory.rs)  │   │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ InventoryRepo   │   │ 001_inv.sql  │  │   │
//! │  │   └───────────────┘    └─────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                  ./data/buyback.db (configurable)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Inventory repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use buyback_core::MemoryInventory;
//! use buyback_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/buyback.db")).await?;
//!
//! // Hydrate the in-memory store at startup
//! let store = MemoryInventory::new();
//! db.inventory().load_into(&store).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::inventory::InventoryRepository;
