//! # History Repository
//!
//! The append-only checkout ledger.
//!
//! ## Append-Only Contract
//! One record per successful checkout, created exactly once. This
//! repository deliberately exposes no update or delete surface; the
//! only reads list records most recent first.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use barista_core::SaleRecord;

/// Repository for the checkout history ledger.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    pool: SqlitePool,
}

impl HistoryRepository {
    /// Creates a new HistoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HistoryRepository { pool }
    }

    /// Appends one completed sale to the ledger.
    pub async fn append(&self, record: &SaleRecord) -> DbResult<()> {
        debug!(id = %record.id, total_cents = %record.total_cents, "Appending sale record");

        sqlx::query(
            r#"
            INSERT INTO history (id, date, items, total_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&record.id)
        .bind(record.date)
        .bind(&record.items)
        .bind(record.total_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all sale records, most recent first.
    pub async fn list_all(&self) -> DbResult<Vec<SaleRecord>> {
        let records = sqlx::query_as::<_, SaleRecord>(
            r#"
            SELECT id, date, items, total_cents
            FROM history
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Counts ledger entries (for diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM history")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new sale record ID.
pub fn generate_record_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_append_and_list_most_recent_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.history();

        let now = Utc::now();
        let earlier = SaleRecord {
            id: generate_record_id(),
            date: now - Duration::minutes(10),
            items: "espresso x1".to_string(),
            total_cents: 250,
        };
        let later = SaleRecord {
            id: generate_record_id(),
            date: now,
            items: "mocha x2".to_string(),
            total_cents: 750,
        };

        repo.append(&earlier).await.unwrap();
        repo.append(&later).await.unwrap();

        let records = repo.list_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].items, "mocha x2");
        assert_eq!(records[1].items, "espresso x1");
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
