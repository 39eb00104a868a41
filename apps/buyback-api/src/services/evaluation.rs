//! Counter evaluation: identify the item, then quote it.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Clerk scans "987654321098"                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lookup_product() ── error ──► message shown, nothing quoted           │
//! │       │                                                                 │
//! │       ├── items empty ──► "No product found with this UPC code"        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricingEngine::quote() ──► $5.00 MEDIUM_DEMAND (10 in stock)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Evaluation { product: items[0], pricing }                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use buyback_core::{CoreError, PriceQuote, PricingEngine};
use tracing::info;

use crate::services::inventory::InventoryService;
use crate::services::lookup::{lookup_product, LookupError, Product, ProductLookup};

/// Result of evaluating one barcode.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub product: Product,
    pub pricing: PriceQuote,
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("No product found with this UPC code")]
    NoProduct,

    #[error(transparent)]
    Pricing(#[from] CoreError),
}

/// Orchestrates lookup then pricing.
#[derive(Clone)]
pub struct EvaluationService {
    lookup: Arc<dyn ProductLookup>,
    inventory: InventoryService,
    engine: Arc<PricingEngine>,
}

impl EvaluationService {
    pub fn new(
        lookup: Arc<dyn ProductLookup>,
        inventory: InventoryService,
        engine: Arc<PricingEngine>,
    ) -> Self {
        EvaluationService {
            lookup,
            inventory,
            engine,
        }
    }

    pub async fn evaluate(&self, raw: &str) -> Result<Evaluation, EvaluationError> {
        let search = lookup_product(self.lookup.as_ref(), raw).await?;
        let product = search.items.into_iter().next().ok_or(EvaluationError::NoProduct)?;

        let pricing = self.engine.quote(self.inventory.store(), raw)?;

        info!(
            barcode = %pricing.barcode,
            tier = %pricing.tier,
            count = pricing.count,
            "Item evaluated"
        );

        Ok(Evaluation { product, pricing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lookup::{LookupResult, ProductSearch};
    use async_trait::async_trait;
    use buyback_core::pricing::TierName;
    use buyback_core::Barcode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        items: Vec<Product>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProductLookup for Fixed {
        async fn search(&self, _barcode: &str) -> LookupResult<ProductSearch> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ProductSearch {
                items: self.items.clone(),
                ..Default::default()
            })
        }
    }

    fn service(items: Vec<Product>) -> (EvaluationService, Arc<Fixed>) {
        let lookup = Arc::new(Fixed {
            items,
            calls: AtomicUsize::new(0),
        });
        let svc = EvaluationService::new(
            lookup.clone(),
            InventoryService::in_memory(),
            Arc::new(PricingEngine::standard()),
        );
        (svc, lookup)
    }

    fn widget() -> Product {
        Product {
            title: Some("Widget".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_evaluates_first_product() {
        let (svc, _) = service(vec![widget(), Product::default()]);
        svc.inventory
            .set_count(&Barcode::parse("987654321098").unwrap(), 10)
            .await
            .unwrap();

        let evaluation = svc.evaluate("987654321098").await.unwrap();
        assert_eq!(evaluation.product.title.as_deref(), Some("Widget"));
        assert_eq!(evaluation.pricing.tier, TierName::MediumDemand);
        assert_eq!(evaluation.pricing.count, 10);
    }

    #[tokio::test]
    async fn test_empty_result_is_no_product() {
        let (svc, _) = service(Vec::new());
        let err = svc.evaluate("123456789012").await.unwrap_err();
        assert!(matches!(err, EvaluationError::NoProduct));
        assert_eq!(err.to_string(), "No product found with this UPC code");
    }

    #[tokio::test]
    async fn test_blank_barcode_never_reaches_backends() {
        let (svc, lookup) = service(vec![widget()]);

        let err = svc.evaluate("  ").await.unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Lookup(LookupError::InvalidBarcode(_))
        ));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }
}
