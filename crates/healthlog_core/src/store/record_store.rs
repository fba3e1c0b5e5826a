//! Ledger owner with repository write-through.
//!
//! # Responsibility
//! - Populate the ledger from the record repository on load.
//! - Apply saves optimistically, then persist them through the repository.
//! - Track entries whose latest value has not been confirmed remotely.
//!
//! # Invariants
//! - A failed load leaves the ledger empty.
//! - A failed save is never rolled back; the date is kept as pending.
//! - A date is pending from its local write until the repository confirms
//!   it, so an abandoned write also leaves it pending.
//! - Log events carry dates and counts only, never recorded values.

use crate::model::entry::{DateKey, Entry, EntryValidationError, Metric};
use crate::repo::record_repo::{RecordRepository, RemoteRecord, RepoError};
use crate::store::ledger::Ledger;
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store failures surfaced to the session.
#[derive(Debug)]
pub enum StoreError {
    /// Entry rejected before touching the ledger.
    Validation(EntryValidationError),
    /// Listing records failed; the ledger is empty.
    LoadFailure(RepoError),
    /// Remote write failed; the ledger already holds the new value.
    SaveFailure { date: DateKey, source: RepoError },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::LoadFailure(err) => write!(f, "failed to load records: {err}"),
            Self::SaveFailure { date, source } => {
                write!(f, "failed to persist record for {date}: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::LoadFailure(err) => Some(err),
            Self::SaveFailure { source, .. } => Some(source),
        }
    }
}

impl From<EntryValidationError> for StoreError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Outcome of re-pushing pending entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetryReport {
    /// Dates confirmed by the repository during this pass.
    pub synced: Vec<DateKey>,
    /// Dates that failed again and stay pending.
    pub still_pending: Vec<DateKey>,
}

/// History window for metric series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesWindow {
    /// Seven days ending at the anchor.
    Week,
    /// Thirty days ending at the anchor.
    Month,
}

impl SeriesWindow {
    pub fn days(self) -> u64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
        }
    }
}

/// One day's value in a metric series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: DateKey,
    pub value: f64,
}

/// Session-scoped owner of the ledger.
pub struct RecordStore<R: RecordRepository> {
    repo: R,
    ledger: Ledger,
    pending: BTreeSet<DateKey>,
}

impl<R: RecordRepository> RecordStore<R> {
    /// Creates a store with an empty ledger.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            ledger: Ledger::new(),
            pending: BTreeSet::new(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn get(&self, date: DateKey) -> Option<&Entry> {
        self.ledger.get(date)
    }

    /// Returns the entry for exactly one calendar day before `date`.
    pub fn get_previous(&self, date: DateKey) -> Option<&Entry> {
        self.ledger.get_previous(date)
    }

    /// Replaces the ledger with every record known to the repository.
    ///
    /// Returns the number of loaded entries.
    ///
    /// # Errors
    /// - `LoadFailure` on transport failure or an unmappable record. The
    ///   ledger is left empty.
    pub async fn load(&mut self) -> StoreResult<usize> {
        let started_at = Instant::now();
        self.ledger.clear();
        self.pending.clear();

        let records = match self.repo.list_records().await {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "event=records_load module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(StoreError::LoadFailure(err));
            }
        };

        let mut loaded = Ledger::new();
        for record in records {
            match record.into_entry() {
                Ok(entry) => loaded.upsert(entry),
                Err(err) => {
                    warn!(
                        "event=records_load module=store status=error duration_ms={} error_code=invalid_record",
                        started_at.elapsed().as_millis()
                    );
                    return Err(StoreError::LoadFailure(err));
                }
            }
        }

        self.ledger = loaded;
        info!(
            "event=records_load module=store status=ok count={} duration_ms={}",
            self.ledger.len(),
            started_at.elapsed().as_millis()
        );
        Ok(self.ledger.len())
    }

    /// Upserts `entry` locally, then writes it through to the repository.
    ///
    /// # Errors
    /// - `Validation` when the entry holds out-of-range values; nothing is
    ///   mutated.
    /// - `SaveFailure` when the repository write fails. The ledger keeps the
    ///   new value and the date is marked pending.
    pub async fn save(&mut self, entry: Entry) -> StoreResult<()> {
        entry.validate()?;
        let date = entry.date;
        let record = RemoteRecord::from_entry(&entry);
        self.ledger.upsert(entry);

        self.push(date, &record).await
    }

    /// Dates whose latest local value is not yet confirmed remotely.
    pub fn pending(&self) -> Vec<DateKey> {
        self.pending.iter().copied().collect()
    }

    /// Re-pushes every pending entry in date order.
    pub async fn retry_pending(&mut self) -> RetryReport {
        let mut report = RetryReport::default();
        let dates = self.pending();

        for date in dates {
            let Some(entry) = self.ledger.get(date) else {
                self.pending.remove(&date);
                continue;
            };
            let record = RemoteRecord::from_entry(entry);
            match self.push(date, &record).await {
                Ok(()) => report.synced.push(date),
                Err(_) => report.still_pending.push(date),
            }
        }

        info!(
            "event=records_retry module=store status=ok synced={} still_pending={}",
            report.synced.len(),
            report.still_pending.len()
        );
        report
    }

    /// Returns `metric` values for the window ending at `anchor`, ascending.
    ///
    /// Days without a value for the metric are skipped.
    pub fn series(&self, metric: Metric, window: SeriesWindow, anchor: DateKey) -> Vec<SeriesPoint> {
        let start = anchor.days_before(window.days() - 1).unwrap_or(anchor);
        self.ledger
            .range(start..=anchor)
            .filter_map(|entry| {
                entry.metric(metric).map(|value| SeriesPoint {
                    date: entry.date,
                    value,
                })
            })
            .collect()
    }

    async fn push(&mut self, date: DateKey, record: &RemoteRecord) -> StoreResult<()> {
        let started_at = Instant::now();
        self.pending.insert(date);
        match self.repo.upsert_record(record).await {
            Ok(()) => {
                self.pending.remove(&date);
                info!(
                    "event=record_save module=store status=ok date={} duration_ms={}",
                    date,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=record_save module=store status=error date={} duration_ms={} error={}",
                    date,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(StoreError::SaveFailure { date, source: err })
            }
        }
    }
}
