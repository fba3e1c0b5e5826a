#![allow(dead_code)]

use healthlog_core::{DateKey, EntryDraft, RecordRepository, RemoteRecord, RepoError, RepoResult};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// In-memory record backend with failure injection.
#[derive(Default)]
pub struct ScriptedRepository {
    records: RefCell<BTreeMap<String, RemoteRecord>>,
    fail_list: Cell<bool>,
    hang_list: Cell<bool>,
    fail_upsert: Cell<bool>,
    hang_upsert: Cell<bool>,
    upsert_calls: Cell<usize>,
}

impl ScriptedRepository {
    pub fn with_records(records: impl IntoIterator<Item = RemoteRecord>) -> Self {
        let repo = Self::default();
        for record in records {
            repo.records
                .borrow_mut()
                .insert(record.recorded_at.clone(), record);
        }
        repo
    }

    pub fn fail_list(&self, value: bool) {
        self.fail_list.set(value);
    }

    /// Makes every later listing wait forever.
    pub fn hang_list(&self, value: bool) {
        self.hang_list.set(value);
    }

    pub fn fail_upsert(&self, value: bool) {
        self.fail_upsert.set(value);
    }

    /// Makes every later upsert wait forever.
    pub fn hang_upsert(&self, value: bool) {
        self.hang_upsert.set(value);
    }

    pub fn stored(&self, date: &str) -> Option<RemoteRecord> {
        self.records.borrow().get(date).cloned()
    }

    pub fn stored_count(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.get()
    }
}

impl RecordRepository for ScriptedRepository {
    async fn list_records(&self) -> RepoResult<Vec<RemoteRecord>> {
        if self.hang_list.get() {
            std::future::pending::<()>().await;
        }
        if self.fail_list.get() {
            return Err(RepoError::Unavailable("connection refused".to_string()));
        }
        Ok(self.records.borrow().values().cloned().collect())
    }

    async fn upsert_record(&self, record: &RemoteRecord) -> RepoResult<()> {
        self.upsert_calls.set(self.upsert_calls.get() + 1);
        if self.hang_upsert.get() {
            std::future::pending::<()>().await;
        }
        if self.fail_upsert.get() {
            return Err(RepoError::Unavailable("503 service unavailable".to_string()));
        }
        self.records
            .borrow_mut()
            .insert(record.recorded_at.clone(), record.clone());
        Ok(())
    }
}

pub fn key(text: &str) -> DateKey {
    DateKey::parse(text).unwrap()
}

pub fn record(date: &str, weight: Option<f64>, sleep: Option<f64>) -> RemoteRecord {
    RemoteRecord {
        recorded_at: date.to_string(),
        weight,
        sleep_time: sleep,
        calorie: None,
        exercise: None,
    }
}

pub fn draft(date: &str, weight: f64, sleep: f64) -> EntryDraft {
    EntryDraft::new(key(date)).weight(weight).sleep_hours(sleep)
}
