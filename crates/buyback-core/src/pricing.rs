//! # Pricing Engine
//!
//! Maps a barcode to a buy-back offer using its current inventory count.
//!
//! ## Tier Evaluation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Standard Tier Table (first match wins)                 │
//! │                                                                         │
//! │  count ──► HIGH_DEMAND    count ≤ 5     $5.00  ──► match? return        │
//! │              │ no                                                       │
//! │              ▼                                                          │
//! │            MEDIUM_DEMAND  count ≤ 15    $5.00  ──► match? return        │
//! │              │ no                                                       │
//! │              ▼                                                          │
//! │            LOW_DEMAND     count ≤ 30    $3.00  ──► match? return        │
//! │              │ no                                                       │
//! │              ▼                                                          │
//! │            OVERSUPPLIED   unbounded     $1.00  ──► always matches       │
//! │              │                                                          │
//! │              ▼                                                          │
//! │            NOT_ACCEPTING                $0.50  (terminal case)          │
//! │                                                                         │
//! │  With the standard table the terminal case is unreachable. It becomes  │
//! │  reachable only when a configured table ends in a finite bound.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order is part of the data: a [`TierTable`] is an explicit `Vec` scanned top
//! to bottom, and its constructor rejects tables whose bounds are not strictly
//! increasing.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::inventory::InventoryStore;
use crate::money::Money;
use crate::types::Barcode;
use crate::validation::ValidationResult;

// =============================================================================
// Tier Names
// =============================================================================

/// A named pricing bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum TierName {
    HighDemand,
    MediumDemand,
    LowDemand,
    Oversupplied,
    /// Terminal outcome when no configured tier admits the count.
    NotAccepting,
}

impl TierName {
    /// The wire name, e.g. `HIGH_DEMAND`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TierName::HighDemand => "HIGH_DEMAND",
            TierName::MediumDemand => "MEDIUM_DEMAND",
            TierName::LowDemand => "LOW_DEMAND",
            TierName::Oversupplied => "OVERSUPPLIED",
            TierName::NotAccepting => "NOT_ACCEPTING",
        }
    }

    /// Parses a wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HIGH_DEMAND" => Some(TierName::HighDemand),
            "MEDIUM_DEMAND" => Some(TierName::MediumDemand),
            "LOW_DEMAND" => Some(TierName::LowDemand),
            "OVERSUPPLIED" => Some(TierName::Oversupplied),
            "NOT_ACCEPTING" => Some(TierName::NotAccepting),
            _ => None,
        }
    }

    /// Human-readable explanation shown next to the offer.
    ///
    /// ## Example
    /// ```rust
    /// use buyback_core::pricing::TierName;
    ///
    /// assert_eq!(TierName::LowDemand.reason(20), "Limited demand (20 in stock)");
    /// ```
    pub fn reason(&self, count: u64) -> String {
        match self {
            TierName::HighDemand => format!("High demand item ({count} in stock)"),
            TierName::MediumDemand => format!("Good seller ({count} in stock)"),
            TierName::LowDemand => format!("Limited demand ({count} in stock)"),
            TierName::Oversupplied => format!("Overstocked ({count} in stock)"),
            TierName::NotAccepting => NOT_ACCEPTING_REASON.to_string(),
        }
    }
}

impl fmt::Display for TierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offer made when no tier admits the count.
pub const NOT_ACCEPTING_PRICE: Money = Money::from_cents(50);

/// Reason given alongside [`NOT_ACCEPTING_PRICE`].
pub const NOT_ACCEPTING_REASON: &str = "We are not currently accepting this item";

// =============================================================================
// Tier Records
// =============================================================================

/// Inclusive upper bound on the inventory count a tier admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierBound {
    AtMost(u64),
    Unbounded,
}

impl TierBound {
    /// `count ≤ bound`.
    #[inline]
    pub const fn admits(&self, count: u64) -> bool {
        match self {
            TierBound::AtMost(max) => count <= *max,
            TierBound::Unbounded => true,
        }
    }
}

/// One row of a tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub name: TierName,
    pub upper_bound: TierBound,
    pub price: Money,
}

impl PricingTier {
    pub const fn new(name: TierName, upper_bound: TierBound, price: Money) -> Self {
        PricingTier {
            name,
            upper_bound,
            price,
        }
    }
}

// =============================================================================
// Tier Table
// =============================================================================

/// An ordered list of tiers evaluated top to bottom.
///
/// ## Invariants (checked by [`TierTable::new`])
/// - At least one tier
/// - `NOT_ACCEPTING` is not listed (it is the implicit terminal case)
/// - Each tier name appears at most once
/// - Bounds strictly increase; only the final tier may be `Unbounded`
/// - Prices are non-negative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    tiers: Vec<PricingTier>,
}

/// Outcome of scanning a tier table for one count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierMatch {
    pub tier: TierName,
    pub price: Money,
    pub reason: String,
}

impl TierTable {
    /// Builds a validated table.
    pub fn new(tiers: Vec<PricingTier>) -> ValidationResult<Self> {
        if tiers.is_empty() {
            return Err(ValidationError::tier_table("at least one tier is required"));
        }

        let mut previous_max: Option<u64> = None;
        for (index, tier) in tiers.iter().enumerate() {
            if tier.name == TierName::NotAccepting {
                return Err(ValidationError::tier_table(
                    "NOT_ACCEPTING is the terminal case and cannot be listed",
                ));
            }

            if tiers[..index].iter().any(|t| t.name == tier.name) {
                return Err(ValidationError::tier_table(format!(
                    "{} is listed more than once",
                    tier.name
                )));
            }

            if tier.price.is_negative() {
                return Err(ValidationError::tier_table(format!(
                    "{} has a negative price",
                    tier.name
                )));
            }

            match tier.upper_bound {
                TierBound::Unbounded if index + 1 != tiers.len() => {
                    return Err(ValidationError::tier_table(format!(
                        "{} is unbounded but is not the last tier",
                        tier.name
                    )));
                }
                TierBound::Unbounded => {}
                TierBound::AtMost(max) => {
                    if previous_max.is_some_and(|prev| max <= prev) {
                        return Err(ValidationError::tier_table(format!(
                            "{} bound {} does not exceed the previous bound",
                            tier.name, max
                        )));
                    }
                    previous_max = Some(max);
                }
            }
        }

        Ok(TierTable { tiers })
    }

    /// The shipped table: 5 / 15 / 30 / unbounded.
    pub fn standard() -> Self {
        TierTable {
            tiers: vec![
                PricingTier::new(TierName::HighDemand, TierBound::AtMost(5), Money::from_cents(500)),
                PricingTier::new(TierName::MediumDemand, TierBound::AtMost(15), Money::from_cents(500)),
                PricingTier::new(TierName::LowDemand, TierBound::AtMost(30), Money::from_cents(300)),
                PricingTier::new(TierName::Oversupplied, TierBound::Unbounded, Money::from_cents(100)),
            ],
        }
    }

    /// The tiers in evaluation order.
    pub fn tiers(&self) -> &[PricingTier] {
        &self.tiers
    }

    /// True when some count falls through every tier.
    pub fn can_refuse(&self) -> bool {
        self.tiers
            .last()
            .is_some_and(|t| t.upper_bound != TierBound::Unbounded)
    }

    /// Finds the first tier whose bound admits `count`.
    pub fn evaluate(&self, count: u64) -> TierMatch {
        self.tiers
            .iter()
            .find(|tier| tier.upper_bound.admits(count))
            .map(|tier| TierMatch {
                tier: tier.name,
                price: tier.price,
                reason: tier.name.reason(count),
            })
            .unwrap_or_else(|| TierMatch {
                tier: TierName::NotAccepting,
                price: NOT_ACCEPTING_PRICE,
                reason: NOT_ACCEPTING_REASON.to_string(),
            })
    }
}

impl Default for TierTable {
    fn default() -> Self {
        TierTable::standard()
    }
}

// =============================================================================
// Price Quote
// =============================================================================

/// A buy-back offer computed at query time.
///
/// Never stored or cached: it is stale as soon as the count changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceQuote {
    pub barcode: Barcode,
    pub price: Money,
    pub tier: TierName,
    /// The count read from the store when the quote was made.
    pub count: u64,
    pub reason: String,
}

/// An inventory row with its current offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricedEntry {
    pub barcode: Barcode,
    pub count: u64,
    pub pricing: PriceQuote,
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Stateless quoting over an [`InventoryStore`].
///
/// The engine holds only its immutable tier table. Every call reads the
/// store afresh and has no side effects.
///
/// ## Example
/// ```rust
/// use buyback_core::inventory::{InventoryStore, MemoryInventory};
/// use buyback_core::pricing::{PricingEngine, TierName};
/// use buyback_core::Barcode;
///
/// let store = MemoryInventory::new();
/// store.set_count(&Barcode::parse("789012345678").unwrap(), 31).unwrap();
///
/// let quote = PricingEngine::standard().quote(&store, "789012345678").unwrap();
/// assert_eq!(quote.tier, TierName::Oversupplied);
/// assert_eq!(quote.price.to_string(), "$1.00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    table: TierTable,
}

impl PricingEngine {
    pub fn new(table: TierTable) -> Self {
        PricingEngine { table }
    }

    /// Engine over [`TierTable::standard`].
    pub fn standard() -> Self {
        PricingEngine::new(TierTable::standard())
    }

    pub fn table(&self) -> &TierTable {
        &self.table
    }

    /// Quotes a raw barcode string.
    ///
    /// ## Errors
    /// `CoreError::InvalidArgument` if the barcode is empty.
    pub fn quote(&self, store: &dyn InventoryStore, barcode: &str) -> CoreResult<PriceQuote> {
        let barcode = Barcode::parse(barcode)?;
        Ok(self.quote_barcode(store, &barcode))
    }

    /// Quotes an already-validated barcode. Never fails.
    pub fn quote_barcode(&self, store: &dyn InventoryStore, barcode: &Barcode) -> PriceQuote {
        let count = store.get_count(barcode);
        self.quote_count(barcode.clone(), count)
    }

    /// Quotes a known count without touching a store.
    pub fn quote_count(&self, barcode: Barcode, count: u64) -> PriceQuote {
        let TierMatch {
            tier,
            price,
            reason,
        } = self.table.evaluate(count);
        PriceQuote {
            barcode,
            price,
            tier,
            count,
            reason,
        }
    }

    /// Pairs every stocked barcode with its current offer.
    ///
    /// Counts come from a single `list_all` snapshot, so the listing is
    /// internally consistent even while other callers mutate the store.
    pub fn price_all(&self, store: &dyn InventoryStore) -> Vec<PricedEntry> {
        store
            .list_all()
            .into_iter()
            .map(|entry| PricedEntry {
                pricing: self.quote_count(entry.barcode.clone(), entry.count),
                barcode: entry.barcode,
                count: entry.count,
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
