//! Inventory service: the in-memory store plus its optional SQLite mirror.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  increment(barcode)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  writes.lock().await  ── one writer at a time                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MemoryInventory.increment()  ──► 7   (authority, returned to caller)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mirror? ──► InventoryRepository.set_count(barcode, 7)                 │
//! │                  │                                                      │
//! │                  └── Err → warn!, caller still gets 7                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unlock                                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The write lock spans both stores, so mirror writes land in the same order
//! as the in-memory updates and the table never goes back to an older count.
//! Reads take only the store's own lock.
//!
//! Receiving workflows (items taken in at the counter) call
//! [`InventoryService::increment`] directly; the admin routes are a thin
//! HTTP wrapper over the same methods.

use std::sync::Arc;

use buyback_core::inventory::seed_demo_inventory;
use buyback_core::validation::storable_count;
use buyback_core::{Barcode, CoreResult, InventoryEntry, InventoryStore, MemoryInventory};
use buyback_db::{DbError, DbResult, InventoryRepository};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Shared inventory handle. Cheap to clone.
#[derive(Debug, Clone)]
pub struct InventoryService {
    store: Arc<MemoryInventory>,
    mirror: Option<InventoryRepository>,
    writes: Arc<Mutex<()>>,
}

impl InventoryService {
    pub fn new(store: Arc<MemoryInventory>, mirror: Option<InventoryRepository>) -> Self {
        InventoryService {
            store,
            mirror,
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Service with no persistence.
    pub fn in_memory() -> Self {
        InventoryService::new(Arc::new(MemoryInventory::new()), None)
    }

    /// The authoritative store, for read-only consumers such as the engine.
    pub fn store(&self) -> &dyn InventoryStore {
        self.store.as_ref()
    }

    pub fn is_persistent(&self) -> bool {
        self.mirror.is_some()
    }

    pub fn get_count(&self, barcode: &Barcode) -> u64 {
        self.store.get_count(barcode)
    }

    pub fn list_all(&self) -> Vec<InventoryEntry> {
        self.store.list_all()
    }

    /// Adds one unit and returns the new count.
    pub async fn increment(&self, barcode: &Barcode) -> u64 {
        let _write = self.writes.lock().await;
        let count = self.store.increment(barcode);
        debug!(barcode = %barcode, count, "Inventory incremented");

        self.mirror_count(barcode, count).await;
        count
    }

    /// Overwrites the count. Negative input leaves both stores untouched.
    pub async fn set_count(&self, barcode: &Barcode, count: i64) -> CoreResult<u64> {
        let _write = self.writes.lock().await;
        let count = self.store.set_count(barcode, count)?;
        debug!(barcode = %barcode, count, "Inventory count set");

        self.mirror_count(barcode, count).await;
        Ok(count)
    }

    /// Loads persisted counts into memory. No-op without a mirror.
    pub async fn hydrate(&self) -> DbResult<usize> {
        let _write = self.writes.lock().await;
        match &self.mirror {
            Some(repo) => repo.load_into(&self.store).await,
            None => Ok(0),
        }
    }

    /// Writes the demo stock levels through the normal write path.
    pub async fn seed_demo(&self) -> CoreResult<()> {
        let _write = self.writes.lock().await;
        seed_demo_inventory(self.store.as_ref())?;

        for entry in self.store.list_all() {
            self.mirror_count(&entry.barcode, entry.count).await;
        }

        info!(barcodes = self.store.len(), "Demo inventory seeded");
        Ok(())
    }

    async fn mirror_count(&self, barcode: &Barcode, count: u64) {
        let Some(repo) = &self.mirror else {
            return;
        };

        let written = match storable_count(count) {
            Ok(stored) => repo.set_count(barcode, stored).await.map(drop),
            Err(e) => Err(DbError::from(e)),
        };
        if let Err(e) = written {
            warn!(barcode = %barcode, count, error = %e, "Failed to mirror inventory count");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buyback_core::CoreError;
    use buyback_db::{Database, DbConfig};

    fn barcode(raw: &str) -> Barcode {
        Barcode::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_service() {
        let service = InventoryService::in_memory();
        let b = barcode("123456789012");

        assert_eq!(service.increment(&b).await, 1);
        assert_eq!(service.set_count(&b, 12).await.unwrap(), 12);
        assert_eq!(service.get_count(&b), 12);
        assert!(!service.is_persistent());
        assert_eq!(service.hydrate().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mutations_are_mirrored() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = InventoryService::new(Arc::new(MemoryInventory::new()), Some(db.inventory()));
        let b = barcode("987654321098");

        service.increment(&b).await;
        service.increment(&b).await;
        assert_eq!(db.inventory().get_count(&b).await.unwrap(), 2);

        service.set_count(&b, 30).await.unwrap();
        assert_eq!(db.inventory().get_count(&b).await.unwrap(), 30);
    }

    #[tokio::test]
    async fn test_negative_count_touches_neither_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = InventoryService::new(Arc::new(MemoryInventory::new()), Some(db.inventory()));
        let b = barcode("456789012345");
        service.set_count(&b, 4).await.unwrap();

        let err = service.set_count(&b, -3).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
        assert_eq!(service.get_count(&b), 4);
        assert_eq!(db.inventory().get_count(&b).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_hydrate_restores_counts() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.inventory().set_count(&barcode("789012345678"), 35).await.unwrap();

        let service = InventoryService::new(Arc::new(MemoryInventory::new()), Some(db.inventory()));
        assert_eq!(service.hydrate().await.unwrap(), 1);
        assert_eq!(service.get_count(&barcode("789012345678")), 35);
    }

    #[tokio::test]
    async fn test_seed_demo_reaches_mirror() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = InventoryService::new(Arc::new(MemoryInventory::new()), Some(db.inventory()));

        service.seed_demo().await.unwrap();

        assert_eq!(service.list_all().len(), 4);
        assert_eq!(db.inventory().count().await.unwrap(), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_keep_mirror_in_step() {
        let path = std::env::temp_dir().join(format!(
            "buyback-mirror-{}-{}.db",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let service = InventoryService::new(Arc::new(MemoryInventory::new()), Some(db.inventory()));

        for round in 0..10 {
            let b = barcode(&format!("55500011{round:04}"));

            let handles: Vec<_> = (0..50)
                .map(|_| {
                    let service = service.clone();
                    let b = b.clone();
                    tokio::spawn(async move { service.increment(&b).await })
                })
                .collect();
            for handle in handles {
                handle.await.unwrap();
            }

            assert_eq!(service.get_count(&b), 50);
            assert_eq!(db.inventory().get_count(&b).await.unwrap(), 50, "round {round}");
        }

        // A restart hydrates the same counts.
        let restarted = InventoryService::new(Arc::new(MemoryInventory::new()), Some(db.inventory()));
        assert_eq!(restarted.hydrate().await.unwrap(), 10);
        assert_eq!(restarted.get_count(&barcode("555000110003")), 50);

        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }
}
