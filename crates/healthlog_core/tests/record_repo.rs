use healthlog_core::db::open_db_in_memory;
use healthlog_core::{RecordRepository, RemoteRecord, RepoError, SqliteRecordRepository};

fn record(date: &str, weight: Option<f64>, sleep: Option<f64>) -> RemoteRecord {
    RemoteRecord {
        recorded_at: date.to_string(),
        weight,
        sleep_time: sleep,
        calorie: None,
        exercise: None,
    }
}

#[tokio::test]
async fn upsert_then_list_returns_records_in_date_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn, "alice");

    repo.upsert_record(&record("2025-04-14", Some(69.5), Some(8.0)))
        .await
        .unwrap();
    repo.upsert_record(&record("2025-04-13", Some(70.0), Some(6.5)))
        .await
        .unwrap();

    let records = repo.list_records().await.unwrap();
    let dates: Vec<&str> = records.iter().map(|r| r.recorded_at.as_str()).collect();
    assert_eq!(dates, vec!["2025-04-13", "2025-04-14"]);
    assert_eq!(records[1].weight, Some(69.5));
    assert_eq!(records[1].sleep_time, Some(8.0));
}

#[tokio::test]
async fn upsert_same_day_replaces_previous_values() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn, "alice");

    repo.upsert_record(&record("2025-04-14", Some(70.0), Some(6.0)))
        .await
        .unwrap();
    let mut update = record("2025-04-14", Some(69.8), Some(7.5));
    update.calorie = Some(1850.0);
    repo.upsert_record(&update).await.unwrap();

    let records = repo.list_records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0], update);
}

#[tokio::test]
async fn upsert_normalizes_timestamp_dates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn, "alice");

    repo.upsert_record(&record("2025-04-14T21:00:00+09:00", Some(70.0), None))
        .await
        .unwrap();

    let records = repo.list_records().await.unwrap();
    assert_eq!(records[0].recorded_at, "2025-04-14");
}

#[tokio::test]
async fn records_are_scoped_to_their_owner() {
    let conn = open_db_in_memory().unwrap();
    let alice = SqliteRecordRepository::new(&conn, "alice");
    let bob = SqliteRecordRepository::new(&conn, "bob");

    alice
        .upsert_record(&record("2025-04-14", Some(55.0), Some(7.0)))
        .await
        .unwrap();
    bob.upsert_record(&record("2025-04-14", Some(82.0), Some(5.0)))
        .await
        .unwrap();

    let alice_records = alice.list_records().await.unwrap();
    assert_eq!(alice_records.len(), 1);
    assert_eq!(alice_records[0].weight, Some(55.0));
    assert_eq!(bob.user_id(), "bob");
}

#[tokio::test]
async fn upsert_rejects_unparseable_date() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn, "alice");

    let err = repo
        .upsert_record(&record("April 14th", Some(70.0), None))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[tokio::test]
async fn list_rejects_corrupt_persisted_date() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO daily_records (user_id, recorded_at, weight) VALUES ('alice', 'yesterday', 70.0);",
        [],
    )
    .unwrap();
    let repo = SqliteRecordRepository::new(&conn, "alice");

    let err = repo.list_records().await.unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("yesterday")));
}

#[test]
fn remote_record_uses_backend_field_names() {
    let json = serde_json::json!({
        "recorded_at": "2025-04-14",
        "weight": 69.5,
        "sleep_time": 8.0
    });
    let decoded: RemoteRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.calorie, None);
    assert_eq!(decoded.exercise, None);

    let entry = decoded.into_entry().unwrap();
    assert_eq!(entry.date.to_string(), "2025-04-14");
    assert_eq!(entry.weight, Some(69.5));
    assert_eq!(entry.sleep_hours, Some(8.0));

    let encoded = serde_json::to_value(RemoteRecord::from_entry(&entry)).unwrap();
    assert_eq!(encoded["recorded_at"], "2025-04-14");
    assert_eq!(encoded["sleep_time"], 8.0);
}

#[test]
fn into_entry_rejects_negative_values() {
    let err = record("2025-04-14", Some(-1.0), None)
        .into_entry()
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
