mod common;

use common::{key, record, ScriptedRepository};
use healthlog_core::{
    Entry, EntryValidationError, Metric, RecordStore, SeriesWindow, StoreError,
};

fn entry(date: &str, weight: f64, sleep: f64) -> Entry {
    Entry {
        weight: Some(weight),
        sleep_hours: Some(sleep),
        ..Entry::empty(key(date))
    }
}

#[tokio::test]
async fn load_populates_ledger_from_repository() {
    let repo = ScriptedRepository::with_records([
        record("2025-04-12", Some(70.4), Some(6.0)),
        record("2025-04-13", Some(70.0), Some(7.5)),
    ]);
    let mut store = RecordStore::new(&repo);

    let count = store.load().await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(store.get(key("2025-04-13")).unwrap().weight, Some(70.0));
    assert_eq!(
        store.get_previous(key("2025-04-13")).unwrap().date,
        key("2025-04-12")
    );
    assert!(store.pending().is_empty());
}

#[tokio::test]
async fn failed_load_leaves_ledger_empty() {
    let repo = ScriptedRepository::with_records([record("2025-04-13", Some(70.0), Some(7.5))]);
    let mut store = RecordStore::new(&repo);
    store.load().await.unwrap();

    repo.fail_list(true);
    let err = store.load().await.unwrap_err();

    assert!(matches!(err, StoreError::LoadFailure(_)));
    assert!(store.ledger().is_empty());
}

#[tokio::test]
async fn load_rejects_invalid_records_without_partial_state() {
    let repo = ScriptedRepository::with_records([
        record("2025-04-12", Some(70.4), Some(6.0)),
        record("2025-04-13", Some(70.0), Some(31.0)),
    ]);
    let mut store = RecordStore::new(&repo);

    let err = store.load().await.unwrap_err();

    assert!(matches!(err, StoreError::LoadFailure(_)));
    assert!(store.ledger().is_empty());
}

#[tokio::test]
async fn saving_same_day_twice_keeps_one_entry() {
    let repo = ScriptedRepository::default();
    let mut store = RecordStore::new(&repo);

    store.save(entry("2025-04-14", 70.0, 6.0)).await.unwrap();
    store.save(entry("2025-04-14", 69.6, 7.0)).await.unwrap();

    assert_eq!(store.ledger().len(), 1);
    assert_eq!(store.get(key("2025-04-14")).unwrap().weight, Some(69.6));
    assert_eq!(repo.stored_count(), 1);
    assert_eq!(repo.stored("2025-04-14").unwrap().weight, Some(69.6));
    assert_eq!(repo.upsert_calls(), 2);
}

#[tokio::test]
async fn invalid_entry_is_rejected_before_any_mutation() {
    let repo = ScriptedRepository::default();
    let mut store = RecordStore::new(&repo);

    let err = store
        .save(entry("2025-04-14", f64::NAN, 7.0))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Validation(EntryValidationError::InvalidValue {
            metric: Metric::Weight,
            ..
        })
    ));
    assert!(store.ledger().is_empty());
    assert_eq!(repo.upsert_calls(), 0);
}

#[tokio::test]
async fn failed_save_keeps_optimistic_value_and_marks_pending() {
    let repo = ScriptedRepository::default();
    repo.fail_upsert(true);
    let mut store = RecordStore::new(&repo);

    let err = store.save(entry("2025-04-14", 70.0, 6.0)).await.unwrap_err();

    match err {
        StoreError::SaveFailure { date, .. } => assert_eq!(date, key("2025-04-14")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.get(key("2025-04-14")).unwrap().weight, Some(70.0));
    assert_eq!(store.pending(), vec![key("2025-04-14")]);
    assert!(repo.stored("2025-04-14").is_none());
}

#[tokio::test]
async fn later_successful_save_clears_pending_date() {
    let repo = ScriptedRepository::default();
    repo.fail_upsert(true);
    let mut store = RecordStore::new(&repo);
    let _ = store.save(entry("2025-04-14", 70.0, 6.0)).await;

    repo.fail_upsert(false);
    store.save(entry("2025-04-14", 69.9, 6.5)).await.unwrap();

    assert!(store.pending().is_empty());
    assert_eq!(repo.stored("2025-04-14").unwrap().weight, Some(69.9));
}

#[tokio::test]
async fn reload_clears_pending_dates() {
    let repo = ScriptedRepository::default();
    repo.fail_upsert(true);
    let mut store = RecordStore::new(&repo);
    let _ = store.save(entry("2025-04-14", 70.0, 6.0)).await;
    assert_eq!(store.pending(), vec![key("2025-04-14")]);

    let count = store.load().await.unwrap();

    assert_eq!(count, 0);
    assert!(store.pending().is_empty());
    assert!(store.get(key("2025-04-14")).is_none());
}

#[tokio::test]
async fn retry_pending_pushes_latest_local_values() {
    let repo = ScriptedRepository::default();
    repo.fail_upsert(true);
    let mut store = RecordStore::new(&repo);
    let _ = store.save(entry("2025-04-13", 70.2, 6.0)).await;
    let _ = store.save(entry("2025-04-14", 70.0, 7.0)).await;

    let report = store.retry_pending().await;
    assert!(report.synced.is_empty());
    assert_eq!(
        report.still_pending,
        vec![key("2025-04-13"), key("2025-04-14")]
    );

    repo.fail_upsert(false);
    let report = store.retry_pending().await;

    assert_eq!(report.synced, vec![key("2025-04-13"), key("2025-04-14")]);
    assert!(report.still_pending.is_empty());
    assert!(store.pending().is_empty());
    assert_eq!(repo.stored("2025-04-13").unwrap().weight, Some(70.2));
}

#[tokio::test]
async fn series_covers_window_ending_at_anchor() {
    let repo = ScriptedRepository::with_records([
        record("2025-03-15", Some(72.3), Some(7.0)),
        record("2025-03-16", Some(72.0), Some(7.0)),
        record("2025-04-07", Some(71.0), Some(7.0)),
        record("2025-04-08", Some(70.8), Some(6.0)),
        record("2025-04-11", Some(70.5), None),
        record("2025-04-14", Some(70.1), Some(8.0)),
        record("2025-04-15", Some(69.9), Some(8.0)),
    ]);
    let mut store = RecordStore::new(&repo);
    store.load().await.unwrap();
    let anchor = key("2025-04-14");

    let week = store.series(Metric::Weight, SeriesWindow::Week, anchor);
    let dates: Vec<String> = week.iter().map(|point| point.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-04-08", "2025-04-11", "2025-04-14"]);
    assert_eq!(week[2].value, 70.1);

    let sleep = store.series(Metric::SleepHours, SeriesWindow::Week, anchor);
    assert_eq!(sleep.len(), 2);

    let month = store.series(Metric::Weight, SeriesWindow::Month, anchor);
    assert_eq!(month.len(), 5);
    assert_eq!(month[0].date, key("2025-03-16"));
}
