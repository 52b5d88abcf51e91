//! SQLite-backed fragment store.
//!
//! One row per extraction entry, written best effort: a failed insert is
//! logged and skipped, the remaining entries still go through, and the
//! overall request is never aborted by persistence trouble.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::result::Extraction;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS fragment (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    tag        TEXT NOT NULL,
    contents   TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
"#;

/// Persists extracted fragments to a relational store.
#[derive(Debug)]
pub struct FragmentStore {
    pool: SqlitePool,
}

impl FragmentStore {
    /// Connect and ensure the schema exists.
    ///
    /// Writes are serialized through a single connection; one extraction
    /// request produces one burst of ordered inserts.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .map_err(|e| Error::Persistence(format!("connecting to {database_url}: {e}")))?;
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| Error::Persistence(format!("creating schema: {e}")))?;
        Ok(Self { pool })
    }

    /// Store one key/value fragment.
    pub async fn store(&self, key: &str, value: &str) -> Result<()> {
        let res = sqlx::query("INSERT INTO fragment (tag, contents) VALUES (?1, ?2)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Persistence(format!("inserting {key}: {e}")))?;
        debug!(key, rows = res.rows_affected(), "store.fragment");
        Ok(())
    }

    /// Store every entry of an extraction, best effort.
    ///
    /// Returns how many fragments were actually written; failures are logged
    /// per entry and do not stop the loop.
    pub async fn store_extraction(&self, extraction: &Extraction) -> usize {
        let mut stored = 0usize;
        for (key, value) in extraction.iter() {
            match self.store(key, value).await {
                Ok(()) => stored += 1,
                Err(err) => warn!(key, error = %err, "store.fragment_failed"),
            }
        }
        info!(
            stored,
            total = extraction.len(),
            "store.extraction_persisted"
        );
        stored
    }

    /// Number of fragments currently in the store.
    pub async fn fragment_count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM fragment")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::Persistence(format!("counting fragments: {e}")))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> FragmentStore {
        FragmentStore::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn stores_each_entry_as_a_row() {
        let store = memory_store().await;

        let mut extraction = Extraction::new();
        extraction.insert("heading_h1_0_0", "Title");
        extraction.insert("paragraph_0_0", "Body");

        let stored = store.store_extraction(&extraction).await;
        assert_eq!(stored, 3); // full_text plus two entries
        assert_eq!(store.fragment_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn empty_extraction_stores_nothing() {
        let store = memory_store().await;
        let stored = store.store_extraction(&Extraction::empty()).await;
        assert_eq!(stored, 0);
        assert_eq!(store.fragment_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn bad_database_url_is_persistence_error() {
        let err = FragmentStore::connect("sqlite:/no/such/dir/x.db")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
    }
}
