//! Daily record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Define `RecordRepository`, the async seam to the record store backend.
//! - Map between the wire record shape and the domain `Entry`.
//! - Provide a SQLite-backed implementation keyed by owner and day.

use crate::db::DbError;
use crate::model::entry::{DateKey, Entry};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RECORD_SELECT_SQL: &str = "SELECT
    recorded_at,
    weight,
    sleep_time,
    calorie,
    exercise
FROM daily_records";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record listing and writes.
#[derive(Debug)]
pub enum RepoError {
    /// Local database failure.
    Db(DbError),
    /// Transport failure reaching the backend.
    Unavailable(String),
    /// Backend returned a record that cannot be mapped to an entry.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "record backend unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid record data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Wire shape of one day's record as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    /// Calendar day, `YYYY-MM-DD`.
    pub recorded_at: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub sleep_time: Option<f64>,
    #[serde(default)]
    pub calorie: Option<f64>,
    #[serde(default)]
    pub exercise: Option<f64>,
}

impl RemoteRecord {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            recorded_at: entry.date.to_string(),
            weight: entry.weight,
            sleep_time: entry.sleep_hours,
            calorie: entry.calories,
            exercise: entry.exercise_minutes,
        }
    }

    /// Maps the wire record into a validated domain entry.
    ///
    /// # Errors
    /// - `InvalidData` when the date cannot be normalized or a value is out
    ///   of range.
    pub fn into_entry(self) -> RepoResult<Entry> {
        let date = DateKey::parse(&self.recorded_at)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;
        let entry = Entry {
            date,
            weight: self.weight,
            sleep_hours: self.sleep_time,
            calories: self.calorie,
            exercise_minutes: self.exercise,
        };
        entry
            .validate()
            .map_err(|err| RepoError::InvalidData(format!("{}: {err}", entry.date)))?;
        Ok(entry)
    }
}

/// Persistence collaborator for daily records of the current user.
///
/// Futures are not required to be `Send`; the session drives them on one
/// logical thread.
#[allow(async_fn_in_trait)]
pub trait RecordRepository {
    /// Lists every record of the current user.
    async fn list_records(&self) -> RepoResult<Vec<RemoteRecord>>;
    /// Creates or replaces the record for `record.recorded_at`.
    async fn upsert_record(&self, record: &RemoteRecord) -> RepoResult<()>;
}

impl<R: RecordRepository> RecordRepository for &R {
    async fn list_records(&self) -> RepoResult<Vec<RemoteRecord>> {
        (**self).list_records().await
    }

    async fn upsert_record(&self, record: &RemoteRecord) -> RepoResult<()> {
        (**self).upsert_record(record).await
    }
}

/// SQLite-backed record repository scoped to one user.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
    user_id: String,
}

impl<'conn> SqliteRecordRepository<'conn> {
    /// Creates a repository over a migrated connection.
    pub fn new(conn: &'conn Connection, user_id: impl Into<String>) -> Self {
        Self {
            conn,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    async fn list_records(&self) -> RepoResult<Vec<RemoteRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RECORD_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY recorded_at ASC;"
        ))?;
        let mut rows = stmt.query([self.user_id.as_str()])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    async fn upsert_record(&self, record: &RemoteRecord) -> RepoResult<()> {
        let date = DateKey::parse(&record.recorded_at)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;

        self.conn.execute(
            "INSERT INTO daily_records (
                user_id,
                recorded_at,
                weight,
                sleep_time,
                calorie,
                exercise
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(user_id, recorded_at) DO UPDATE SET
                weight = excluded.weight,
                sleep_time = excluded.sleep_time,
                calorie = excluded.calorie,
                exercise = excluded.exercise,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                self.user_id.as_str(),
                date.to_string(),
                record.weight,
                record.sleep_time,
                record.calorie,
                record.exercise,
            ],
        )?;

        Ok(())
    }
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<RemoteRecord> {
    let recorded_at: String = row.get("recorded_at")?;
    if DateKey::parse(&recorded_at).is_err() {
        return Err(RepoError::InvalidData(format!(
            "invalid date `{recorded_at}` in daily_records.recorded_at"
        )));
    }

    Ok(RemoteRecord {
        recorded_at,
        weight: row.get("weight")?,
        sleep_time: row.get("sleep_time")?,
        calorie: row.get("calorie")?,
        exercise: row.get("exercise")?,
    })
}
