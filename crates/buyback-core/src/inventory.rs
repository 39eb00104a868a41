//! # Inventory Store
//!
//! Holds the authoritative per-barcode count that the Pricing Engine reads.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Who Owns the Counts                                 │
//! │                                                                         │
//! │  process start                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MemoryInventory::new()  ──► Arc<MemoryInventory>                      │
//! │                                   │                                     │
//! │             ┌─────────────────────┼─────────────────────┐              │
//! │             ▼                     ▼                     ▼              │
//! │      PricingEngine::quote   admin handlers      receiving workflow     │
//! │        (read only)        (increment / set)        (increment)         │
//! │                                                                         │
//! │  No global state: every consumer is handed the store explicitly.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! `MemoryInventory` guards its map with a `parking_lot::RwLock`. A mutation
//! holds the write lock for the whole read-modify-write, so a concurrent
//! `get_count` observes the value either before or after an increment, never
//! in between. There is no ordering across different barcodes.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::types::Barcode;
use crate::validation::{storable_count, validate_count};

// =============================================================================
// Inventory Entry
// =============================================================================

/// One row of an inventory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryEntry {
    pub barcode: Barcode,
    pub count: u64,
}

// =============================================================================
// Inventory Store Trait
// =============================================================================

/// Read/write access to per-barcode counts.
///
/// ## Contract
/// - Unknown barcodes read as 0 and never fail.
/// - Counts are never negative (`u64`); signed input is validated.
/// - Each mutation is atomic with respect to readers of the same barcode.
pub trait InventoryStore: Send + Sync {
    /// Returns the current count, 0 if the barcode was never seen.
    fn get_count(&self, barcode: &Barcode) -> u64;

    /// Adds one unit and returns the new count (1 for an unknown barcode).
    fn increment(&self, barcode: &Barcode) -> u64;

    /// Overwrites the count.
    ///
    /// ## Errors
    /// `CoreError::InvalidArgument` if `count` is negative. The stored value
    /// is left unchanged in that case.
    fn set_count(&self, barcode: &Barcode, count: i64) -> CoreResult<u64>;

    /// Returns every stocked barcode with its count.
    ///
    /// The snapshot is taken atomically and ordered by barcode, so a single
    /// call is stable. Two calls may differ if the store changed in between.
    fn list_all(&self) -> Vec<InventoryEntry>;
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// Process-local inventory store.
///
/// ## Usage
/// ```rust
/// use buyback_core::inventory::{InventoryStore, MemoryInventory};
/// use buyback_core::Barcode;
///
/// let store = MemoryInventory::new();
/// let barcode = Barcode::parse("987654321098").unwrap();
///
/// assert_eq!(store.get_count(&barcode), 0);
/// assert_eq!(store.increment(&barcode), 1);
/// store.set_count(&barcode, 10).unwrap();
/// assert_eq!(store.get_count(&barcode), 10);
/// ```
#[derive(Debug, Default)]
pub struct MemoryInventory {
    counts: RwLock<BTreeMap<Barcode, u64>>,
}

impl MemoryInventory {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryInventory::default()
    }

    /// Creates a store pre-loaded with counts.
    ///
    /// Later duplicates of a barcode overwrite earlier ones.
    pub fn with_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (Barcode, u64)>,
    {
        MemoryInventory {
            counts: RwLock::new(counts.into_iter().collect()),
        }
    }

    /// Overwrites counts in bulk (used to hydrate from a persisted snapshot).
    pub fn load<I>(&self, counts: I)
    where
        I: IntoIterator<Item = (Barcode, u64)>,
    {
        let mut map = self.counts.write();
        map.extend(counts);
    }

    /// Number of distinct barcodes held.
    pub fn len(&self) -> usize {
        self.counts.read().len()
    }

    /// True when no barcode has ever been stocked.
    pub fn is_empty(&self) -> bool {
        self.counts.read().is_empty()
    }
}

impl InventoryStore for MemoryInventory {
    fn get_count(&self, barcode: &Barcode) -> u64 {
        self.counts.read().get(barcode).copied().unwrap_or(0)
    }

    fn increment(&self, barcode: &Barcode) -> u64 {
        let mut map = self.counts.write();
        let count = map.entry(barcode.clone()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    fn set_count(&self, barcode: &Barcode, count: i64) -> CoreResult<u64> {
        let count = validate_count(count)?;
        self.counts.write().insert(barcode.clone(), count);
        Ok(count)
    }

    fn list_all(&self) -> Vec<InventoryEntry> {
        self.counts
            .read()
            .iter()
            .map(|(barcode, count)| InventoryEntry {
                barcode: barcode.clone(),
                count: *count,
            })
            .collect()
    }
}

// =============================================================================
// Demo Data
// =============================================================================

/// Sample stock levels covering every standard tier.
///
/// | Barcode | Count | Tier |
/// |---|---|---|
/// | 123456789012 | 2 | HIGH_DEMAND |
/// | 987654321098 | 10 | MEDIUM_DEMAND |
/// | 456789012345 | 20 | LOW_DEMAND |
/// | 789012345678 | 35 | OVERSUPPLIED |
pub const DEMO_INVENTORY: &[(&str, u64)] = &[
    ("123456789012", 2),
    ("987654321098", 10),
    ("456789012345", 20),
    ("789012345678", 35),
];

/// Writes [`DEMO_INVENTORY`] into a store.
pub fn seed_demo_inventory(store: &dyn InventoryStore) -> CoreResult<()> {
    for (raw, count) in DEMO_INVENTORY {
        let barcode = Barcode::parse(raw)?;
        store.set_count(&barcode, storable_count(*count)?)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
