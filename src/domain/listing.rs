//! Core domain entities for extracted listings and persisted price records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One successfully extracted product listing.
///
/// Only constructed after both name and price pass validation; a candidate
/// that fails either check is rejected, never emitted with empty fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedItem {
    pub store: String,
    pub item_name: String,
    /// Currency-formatted text as it appeared on the page, e.g. "$7.99".
    pub price: String,
}

impl ExtractedItem {
    /// Stable identity for this (store, item name) pair.
    pub fn identity(&self) -> String {
        identity_hash(&self.store, &self.item_name)
    }
}

/// A price record as stored in the database.
///
/// `created_at` is set on first observation and never overwritten; `price`
/// and `last_seen_at` are refreshed on every crawl that sees the item again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub id: String,
    pub store: String,
    pub item_name: String,
    pub price: String,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// An operation the reconcile engine asks the record store to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOp {
    Create(PersistedRecord),
    /// Price refresh for an already-known identity. Carries the snapshot's
    /// original `created_at` so the store can write the full row back
    /// without losing it.
    Update {
        id: String,
        store: String,
        item_name: String,
        price: String,
        created_at: DateTime<Utc>,
        last_seen_at: DateTime<Utc>,
    },
}

impl RecordOp {
    pub fn id(&self) -> &str {
        match self {
            Self::Create(record) => &record.id,
            Self::Update { id, .. } => id,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create(_))
    }

    /// The full record this operation writes, regardless of variant.
    pub fn as_record(&self) -> PersistedRecord {
        match self {
            Self::Create(record) => record.clone(),
            Self::Update {
                id,
                store,
                item_name,
                price,
                created_at,
                last_seen_at,
            } => PersistedRecord {
                id: id.clone(),
                store: store.clone(),
                item_name: item_name.clone(),
                price: price.clone(),
                created_at: *created_at,
                last_seen_at: *last_seen_at,
            },
        }
    }
}

/// Created/updated tallies from one reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileCounts {
    pub created: usize,
    pub updated: usize,
}

impl ReconcileCounts {
    pub fn total(&self) -> usize {
        self.created + self.updated
    }
}

/// Derive the persisted-record identity from store and item name.
///
/// Case and surrounding whitespace are normalized first so the same product
/// observed with cosmetic differences maps to one record. Price is mutable
/// state, not identity.
pub fn identity_hash(store: &str, item_name: &str) -> String {
    let key = format!(
        "{}_{}",
        store.trim().to_lowercase(),
        item_name.trim().to_lowercase()
    );
    blake3::hash(key.as_bytes()).to_hex().to_string()
}
