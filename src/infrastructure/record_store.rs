//! SQLite-backed price record store.
//!
//! Applies reconcile operations idempotently keyed by record id and serves
//! the prior snapshot the reconcile engine diffs against. The engine itself
//! never touches the database; it only sees the snapshot map.

use crate::domain::{PersistedRecord, RecordOp};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct RecordStore {
    pool: Arc<SqlitePool>,
}

impl RecordStore {
    /// Open (creating if needed) the store at the given path.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("opening record store at {}", path.display()))?;
        let store = Self {
            pool: Arc::new(pool),
        };
        store.migrate().await?;
        Ok(store)
    }

    /// In-memory store, for tests.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self {
            pool: Arc::new(pool),
        };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS egg_prices (
                id TEXT PRIMARY KEY,
                store TEXT NOT NULL,
                item_name TEXT NOT NULL,
                price TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_seen_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    /// Load the full prior snapshot, keyed by record id.
    pub async fn load_snapshot(&self) -> Result<HashMap<String, PersistedRecord>> {
        let rows = sqlx::query(
            "SELECT id, store, item_name, price, created_at, last_seen_at FROM egg_prices",
        )
        .fetch_all(&*self.pool)
        .await?;

        let mut snapshot = HashMap::with_capacity(rows.len());
        for row in rows {
            let record = PersistedRecord {
                id: row.get("id"),
                store: row.get("store"),
                item_name: row.get("item_name"),
                price: row.get("price"),
                created_at: row.get::<DateTime<Utc>, _>("created_at"),
                last_seen_at: row.get::<DateTime<Utc>, _>("last_seen_at"),
            };
            snapshot.insert(record.id.clone(), record);
        }
        Ok(snapshot)
    }

    /// Apply reconcile operations; each one is a keyed create-or-replace, so
    /// replaying a batch is harmless.
    pub async fn apply(&self, operations: &[RecordOp]) -> Result<usize> {
        let mut applied = 0;
        for op in operations {
            let record = op.as_record();
            sqlx::query(
                r#"
                INSERT OR REPLACE INTO egg_prices
                (id, store, item_name, price, created_at, last_seen_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.id)
            .bind(&record.store)
            .bind(&record.item_name)
            .bind(&record.price)
            .bind(record.created_at)
            .bind(record.last_seen_at)
            .execute(&*self.pool)
            .await?;
            applied += 1;
        }
        info!("applied {applied} record operations");
        Ok(applied)
    }
}
