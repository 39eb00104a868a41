//! # Repository Module
//!
//! Database repository implementations for the buyback counter.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  InventoryService (buyback-api)                                        │
//! │       │                                                                 │
//! │       │  db.inventory().set_count(&barcode, 12)                        │
//! │       ▼                                                                 │
//! │  InventoryRepository                                                   │
//! │  ├── get_count(&self, barcode)                                         │
//! │  ├── increment(&self, barcode)                                         │
//! │  ├── set_count(&self, barcode, count)                                  │
//! │  ├── list_all(&self)                                                   │
//! │  └── load_into(&self, store)                                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`inventory::InventoryRepository`] - Per-barcode counts

pub mod inventory;
