//! Reconciliation engine: map a batch of extracted items onto the persisted
//! snapshot as create/update operations.
//!
//! Pure and synchronous; the record store applies the operations afterwards.

use crate::domain::{ExtractedItem, PersistedRecord, ReconcileCounts, RecordOp};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Diff `items` against `snapshot`.
///
/// A known identity becomes an `Update` carrying the new price and
/// `last_seen_at = now` while preserving the snapshot's `created_at`; an
/// unknown one becomes a `Create` with both timestamps set to `now`.
/// Duplicate identities within the batch collapse last-wins, folded in input
/// order: the operation keeps the position of the identity's first
/// appearance but carries the data of its last.
pub fn reconcile(
    items: &[ExtractedItem],
    snapshot: &HashMap<String, PersistedRecord>,
    now: DateTime<Utc>,
) -> (Vec<RecordOp>, ReconcileCounts) {
    let mut operations: Vec<RecordOp> = Vec::with_capacity(items.len());
    let mut slot_by_id: HashMap<String, usize> = HashMap::new();

    for item in items {
        let id = item.identity();
        let op = match snapshot.get(&id) {
            Some(existing) => RecordOp::Update {
                id: id.clone(),
                store: item.store.clone(),
                item_name: item.item_name.clone(),
                price: item.price.clone(),
                created_at: existing.created_at,
                last_seen_at: now,
            },
            None => RecordOp::Create(PersistedRecord {
                id: id.clone(),
                store: item.store.clone(),
                item_name: item.item_name.clone(),
                price: item.price.clone(),
                created_at: now,
                last_seen_at: now,
            }),
        };

        match slot_by_id.get(&id) {
            Some(&slot) => operations[slot] = op,
            None => {
                slot_by_id.insert(id, operations.len());
                operations.push(op);
            }
        }
    }

    let created = operations.iter().filter(|op| op.is_create()).count();
    let counts = ReconcileCounts {
        created,
        updated: operations.len() - created,
    };
    (operations, counts)
}
