//! # buyback-core: Pure Business Logic for the Buyback Counter
//!
//! This crate holds the pricing rules and the inventory counts they read.
//! Everything here is synchronous and free of I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Buyback Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Scan / type barcode  (display layer)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    buyback-api (axum)                           │   │
//! │  │        /pricing, /lookup, /evaluate, /admin/inventory           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ buyback-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │ inventory │  │   money   │  │   scan    │  │   │
//! │  │   │ TierTable │  │ Memory-   │  │   Money   │  │ Barcode-  │  │   │
//! │  │   │ Engine    │  │ Inventory │  │           │  │ Decoder   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 buyback-db (optional mirror)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Barcode` identifier
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`inventory`] - Inventory Store trait and in-memory implementation
//! - [`pricing`] - Tier table and Pricing Engine
//! - [`scan`] - Pluggable barcode decoding capability
//!
//! ## Example Usage
//!
//! ```rust
//! use buyback_core::inventory::{InventoryStore, MemoryInventory};
//! use buyback_core::pricing::{PricingEngine, TierName};
//! use buyback_core::Barcode;
//!
//! let store = MemoryInventory::new();
//! let engine = PricingEngine::standard();
//! let barcode = Barcode::parse("123456789012").unwrap();
//!
//! for _ in 0..3 {
//!     store.increment(&barcode);
//! }
//!
//! let quote = engine.quote(&store, "123456789012").unwrap();
//! assert_eq!(quote.tier, TierName::HighDemand);
//! assert_eq!(quote.count, 3);
//! assert_eq!(quote.price.cents(), 500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod money;
pub mod pricing;
pub mod scan;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{InventoryEntry, InventoryStore, MemoryInventory};
pub use money::Money;
pub use pricing::{PriceQuote, PricingEngine, TierTable};
pub use types::Barcode;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum barcode length accepted by the external product lookup.
///
/// The pricing core accepts any non-empty barcode; only the lookup proxy
/// enforces this, because the upstream search rejects very short queries.
pub const MIN_LOOKUP_QUERY_LENGTH: usize = 3;
