//! # Inventory Repository
//!
//! Database operations for per-barcode counts.
//!
//! ## Write-Through Mirror
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Counts Live                                    │
//! │                                                                         │
//! │  startup:   inventory table ──load_into──► MemoryInventory             │
//! │                                                                         │
//! │  running:   MemoryInventory.increment()  → 7                           │
//! │                    │                                                    │
//! │                    └──► set_count(barcode, 7)  (mirror)                │
//! │                                                                         │
//! │  The mirror writes the count the memory store returned. Callers that   │
//! │  write concurrently must order their mirror writes themselves.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use buyback_core::validation::validate_count;
use buyback_core::{Barcode, InventoryEntry, MemoryInventory};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// One row of the `inventory` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InventoryRow {
    pub barcode: String,
    pub count: i64,
    pub updated_at: DateTime<Utc>,
}

impl InventoryRow {
    /// Converts to the domain entry, rejecting rows no code path should write.
    pub fn into_entry(self) -> DbResult<InventoryEntry> {
        let barcode =
            Barcode::parse(&self.barcode).map_err(|e| DbError::corrupt(&self.barcode, e.to_string()))?;
        let count =
            validate_count(self.count).map_err(|e| DbError::corrupt(&self.barcode, e.to_string()))?;
        Ok(InventoryEntry { barcode, count })
    }
}

/// Repository for inventory database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.inventory();
///
/// let count = repo.increment(&barcode).await?;
/// repo.set_count(&barcode, 12).await?;
/// let rows = repo.list_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Returns the stored count, 0 when the barcode has no row.
    pub async fn get_count(&self, barcode: &Barcode) -> DbResult<u64> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT count FROM inventory WHERE barcode = ?1")
                .bind(barcode.as_str())
                .fetch_optional(&self.pool)
                .await?;

        match count {
            Some(count) => {
                validate_count(count).map_err(|e| DbError::corrupt(barcode.as_str(), e.to_string()))
            }
            None => Ok(0),
        }
    }

    /// Adds one unit and returns the new count.
    ///
    /// A single upsert, so concurrent callers never lose an increment.
    pub async fn increment(&self, barcode: &Barcode) -> DbResult<u64> {
        debug!(barcode = %barcode, "Incrementing stored count");

        let count: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO inventory (barcode, count, updated_at)
            VALUES (?1, 1, ?2)
            ON CONFLICT(barcode) DO UPDATE SET
                count = count + 1,
                updated_at = excluded.updated_at
            RETURNING count
            "#,
        )
        .bind(barcode.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        validate_count(count).map_err(|e| DbError::corrupt(barcode.as_str(), e.to_string()))
    }

    /// Overwrites the stored count.
    ///
    /// ## Returns
    /// * `Ok(count)` - The value written
    /// * `Err(DbError::Invalid)` - Negative count; nothing is written
    pub async fn set_count(&self, barcode: &Barcode, count: i64) -> DbResult<u64> {
        let validated = validate_count(count)?;

        debug!(barcode = %barcode, count = validated, "Writing stored count");

        sqlx::query(
            r#"
            INSERT INTO inventory (barcode, count, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(barcode) DO UPDATE SET
                count = excluded.count,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(barcode.as_str())
        .bind(count)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(validated)
    }

    /// Returns every row ordered by barcode.
    pub async fn list_rows(&self) -> DbResult<Vec<InventoryRow>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            "SELECT barcode, count, updated_at FROM inventory ORDER BY barcode",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns every stocked barcode with its count, ordered by barcode.
    pub async fn list_all(&self) -> DbResult<Vec<InventoryEntry>> {
        self.list_rows()
            .await?
            .into_iter()
            .map(InventoryRow::into_entry)
            .collect()
    }

    /// Number of stored barcodes.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Copies every stored count into `store`, overwriting what it held.
    ///
    /// ## Returns
    /// Number of barcodes loaded.
    pub async fn load_into(&self, store: &MemoryInventory) -> DbResult<usize> {
        let entries = self.list_all().await?;
        let loaded = entries.len();

        store.load(entries.into_iter().map(|e| (e.barcode, e.count)));

        info!(loaded, "Hydrated inventory from database");
        Ok(loaded)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use buyback_core::InventoryStore;

    async fn repo() -> InventoryRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .inventory()
    }

    fn barcode(raw: &str) -> Barcode {
        Barcode::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_barcode_reads_zero() {
        let repo = repo().await;
        assert_eq!(repo.get_count(&barcode("000000000000")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_increment_upserts() {
        let repo = repo().await;
        let b = barcode("123456789012");

        assert_eq!(repo.increment(&b).await.unwrap(), 1);
        assert_eq!(repo.increment(&b).await.unwrap(), 2);
        assert_eq!(repo.increment(&b).await.unwrap(), 3);
        assert_eq!(repo.get_count(&b).await.unwrap(), 3);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_set_count_overwrites() {
        let repo = repo().await;
        let b = barcode("987654321098");

        repo.set_count(&b, 10).await.unwrap();
        repo.set_count(&b, 16).await.unwrap();
        assert_eq!(repo.get_count(&b).await.unwrap(), 16);

        assert_eq!(repo.increment(&b).await.unwrap(), 17);
    }

    #[tokio::test]
    async fn test_negative_set_count_is_rejected() {
        let repo = repo().await;
        let b = barcode("456789012345");
        repo.set_count(&b, 4).await.unwrap();

        let err = repo.set_count(&b, -1).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));
        assert_eq!(repo.get_count(&b).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_list_all_is_ordered() {
        let repo = repo().await;
        repo.set_count(&barcode("300"), 3).await.unwrap();
        repo.set_count(&barcode("100"), 1).await.unwrap();
        repo.set_count(&barcode("200"), 2).await.unwrap();

        let listed: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| (e.barcode.to_string(), e.count))
            .collect();

        assert_eq!(
            listed,
            vec![
                ("100".to_string(), 1),
                ("200".to_string(), 2),
                ("300".to_string(), 3),
            ]
        );
    }

    #[tokio::test]
    async fn test_load_into_hydrates_memory_store() {
        let repo = repo().await;
        repo.set_count(&barcode("789012345678"), 35).await.unwrap();
        repo.set_count(&barcode("123456789012"), 2).await.unwrap();

        let store = MemoryInventory::new();
        store.set_count(&barcode("123456789012"), 99).unwrap();

        let loaded = repo.load_into(&store).await.unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(store.get_count(&barcode("789012345678")), 35);
        assert_eq!(store.get_count(&barcode("123456789012")), 2);
    }

    #[tokio::test]
    async fn test_corrupt_row_is_reported() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO inventory (barcode, count, updated_at) VALUES ('   ', 1, ?1)")
            .bind(Utc::now())
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.inventory().list_all().await.unwrap_err();
        assert!(matches!(err, DbError::CorruptRow { .. }));
    }
}
