//! Reconcile engine + SQLite record store round trips.

use chrono::{DateTime, Duration, TimeZone, Utc};
use eggwatch::application::reconcile;
use eggwatch::domain::{ExtractedItem, RecordOp};
use eggwatch::infrastructure::RecordStore;

fn item(store: &str, name: &str, price: &str) -> ExtractedItem {
    ExtractedItem {
        store: store.to_string(),
        item_name: name.to_string(),
        price: price.to_string(),
    }
}

// whole-second timestamps round-trip exactly through the TEXT columns
fn crawl_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0).unwrap()
}

#[tokio::test]
async fn fresh_store_round_trip_creates_then_updates() {
    let store = RecordStore::in_memory().await.unwrap();
    let first_run = crawl_time();

    let batch = vec![
        item("Woolworths", "Free Range Eggs 12pk", "$7.99"),
        item("Pak'nSave", "Barn Laid Eggs", "$5.99"),
    ];
    let prior = store.load_snapshot().await.unwrap();
    assert!(prior.is_empty());

    let (ops, counts) = reconcile(&batch, &prior, first_run);
    assert_eq!(counts.created, 2);
    assert_eq!(counts.updated, 0);
    assert_eq!(store.apply(&ops).await.unwrap(), 2);

    // second crawl a day later: one price moved, one new item appeared
    let second_run = first_run + Duration::days(1);
    let batch = vec![
        item("Woolworths", "Free Range Eggs 12pk", "$8.49"),
        item("Pak'nSave", "Barn Laid Eggs", "$5.99"),
        item("Woolworths", "Organic Eggs 10pk", "$11.99"),
    ];
    let prior = store.load_snapshot().await.unwrap();
    let (ops, counts) = reconcile(&batch, &prior, second_run);
    assert_eq!(counts.created, 1);
    assert_eq!(counts.updated, 2);
    store.apply(&ops).await.unwrap();

    let snapshot = store.load_snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 3);

    let updated = snapshot
        .get(&item("Woolworths", "Free Range Eggs 12pk", "").identity())
        .unwrap();
    assert_eq!(updated.price, "$8.49");
    assert_eq!(updated.created_at, prior[&updated.id].created_at);
    assert_eq!(updated.last_seen_at, second_run);

    let created = snapshot
        .get(&item("Woolworths", "Organic Eggs 10pk", "").identity())
        .unwrap();
    assert_eq!(created.created_at, second_run);
}

#[tokio::test]
async fn replaying_a_batch_is_idempotent() {
    let store = RecordStore::in_memory().await.unwrap();
    let now = crawl_time();

    let batch = vec![item("Woolworths", "Free Range Eggs 12pk", "$7.99")];
    let (ops, _) = reconcile(&batch, &store.load_snapshot().await.unwrap(), now);
    store.apply(&ops).await.unwrap();
    store.apply(&ops).await.unwrap();

    let snapshot = store.load_snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 1);
}

#[tokio::test]
async fn in_batch_duplicates_write_one_row_with_last_price() {
    let store = RecordStore::in_memory().await.unwrap();
    let now = crawl_time();

    let batch = vec![
        item("Woolworths", "Free Range Eggs 12pk", "$7.99"),
        item("Woolworths", "Free Range Eggs 12pk", "$7.49"),
    ];
    let (ops, counts) = reconcile(&batch, &store.load_snapshot().await.unwrap(), now);
    assert_eq!(ops.len(), 1);
    assert_eq!(counts.total(), 1);
    store.apply(&ops).await.unwrap();

    let snapshot = store.load_snapshot().await.unwrap();
    let record = snapshot.values().next().unwrap();
    assert_eq!(record.price, "$7.49");
}

#[tokio::test]
async fn on_disk_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("egg_prices.sqlite");
    let now = crawl_time();

    {
        let store = RecordStore::open(&path).await.unwrap();
        let batch = vec![item("Pak'nSave", "Barn Laid Eggs", "$5.99")];
        let (ops, _) = reconcile(&batch, &store.load_snapshot().await.unwrap(), now);
        assert!(matches!(ops[0], RecordOp::Create(_)));
        store.apply(&ops).await.unwrap();
    }

    let store = RecordStore::open(&path).await.unwrap();
    let snapshot = store.load_snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.values().next().unwrap().item_name, "Barn Laid Eggs");
}
