//! Daily entry model and calendar-day keys.
//!
//! # Responsibility
//! - Normalize calendar input into one canonical `DateKey`.
//! - Define the per-day `Entry` and its validated construction path.
//!
//! # Invariants
//! - `DateKey` is timezone-naive; its text form is always `YYYY-MM-DD`.
//! - `previous()` is exactly one calendar day earlier, never interpolated.
//! - A committed `Entry` only carries finite, non-negative metric values.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
const MAX_SLEEP_HOURS: f64 = 24.0;

/// Canonical calendar-day identifier for ledger lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a key from calendar components, `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Normalizes a zoned timestamp to the calendar day in its own offset.
    ///
    /// No UTC conversion is applied, so an evening entry in UTC+9 stays on
    /// the day the user selected.
    pub fn from_datetime<Tz: TimeZone>(value: &DateTime<Tz>) -> Self {
        Self(value.date_naive())
    }

    /// Parses calendar input into a key.
    ///
    /// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp. Surrounding
    /// whitespace is ignored.
    ///
    /// # Errors
    /// - Returns `EntryValidationError::InvalidDate` for anything else.
    pub fn parse(value: &str) -> Result<Self, EntryValidationError> {
        let trimmed = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_KEY_FORMAT) {
            return Ok(Self(date));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|timestamp| Self::from_datetime(&timestamp))
            .map_err(|_| EntryValidationError::InvalidDate(trimmed.to_string()))
    }

    /// Returns the key for the preceding calendar day.
    pub fn previous(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Returns the key `days` calendar days earlier.
    pub fn days_before(self, days: u64) -> Option<Self> {
        self.0
            .checked_sub_days(chrono::Days::new(days))
            .map(Self)
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl TryFrom<String> for DateKey {
    type Error = EntryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(value: DateKey) -> Self {
        value.to_string()
    }
}

/// Numeric metric recorded per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Body weight in kilograms.
    Weight,
    /// Sleep duration in hours.
    SleepHours,
    /// Calorie intake in kcal.
    Calories,
    /// Exercise duration in minutes.
    ExerciseMinutes,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Weight,
        Metric::SleepHours,
        Metric::Calories,
        Metric::ExerciseMinutes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::SleepHours => "sleep",
            Self::Calories => "calories",
            Self::ExerciseMinutes => "exercise",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weight" => Some(Self::Weight),
            "sleep" | "sleep_hours" => Some(Self::SleepHours),
            "calories" | "calorie" => Some(Self::Calories),
            "exercise" | "exercise_minutes" => Some(Self::ExerciseMinutes),
            _ => None,
        }
    }
}

/// One calendar day's recorded values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub date: DateKey,
    /// Kilograms.
    pub weight: Option<f64>,
    /// Hours.
    pub sleep_hours: Option<f64>,
    /// Captured for history; folded into evaluation only with a calorie target.
    pub calories: Option<f64>,
    /// Captured for history only.
    pub exercise_minutes: Option<f64>,
}

impl Entry {
    /// Creates an entry with no recorded values.
    pub fn empty(date: DateKey) -> Self {
        Self {
            date,
            weight: None,
            sleep_hours: None,
            calories: None,
            exercise_minutes: None,
        }
    }

    /// Returns the stored value for one metric.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Weight => self.weight,
            Metric::SleepHours => self.sleep_hours,
            Metric::Calories => self.calories,
            Metric::ExerciseMinutes => self.exercise_minutes,
        }
    }

    /// Checks every present metric against value-range rules.
    ///
    /// # Errors
    /// - `InvalidValue` for NaN, infinite or negative values, or sleep above 24h.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        for metric in Metric::ALL {
            if let Some(value) = self.metric(metric) {
                check_value(metric, value)?;
            }
        }
        Ok(())
    }
}

/// Unvalidated calendar form input for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub date: DateKey,
    pub weight: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub calories: Option<f64>,
    pub exercise_minutes: Option<f64>,
}

impl EntryDraft {
    pub fn new(date: DateKey) -> Self {
        Self {
            date,
            weight: None,
            sleep_hours: None,
            calories: None,
            exercise_minutes: None,
        }
    }

    pub fn weight(mut self, kilograms: f64) -> Self {
        self.weight = Some(kilograms);
        self
    }

    pub fn sleep_hours(mut self, hours: f64) -> Self {
        self.sleep_hours = Some(hours);
        self
    }

    pub fn calories(mut self, kcal: f64) -> Self {
        self.calories = Some(kcal);
        self
    }

    pub fn exercise_minutes(mut self, minutes: f64) -> Self {
        self.exercise_minutes = Some(minutes);
        self
    }

    /// Converts form input into a committable entry.
    ///
    /// # Errors
    /// - `MissingField` when weight or sleep is absent.
    /// - `InvalidValue` when any supplied value fails `Entry::validate`.
    pub fn validate(self) -> Result<Entry, EntryValidationError> {
        if self.weight.is_none() {
            return Err(EntryValidationError::MissingField(Metric::Weight));
        }
        if self.sleep_hours.is_none() {
            return Err(EntryValidationError::MissingField(Metric::SleepHours));
        }

        let entry = Entry {
            date: self.date,
            weight: self.weight,
            sleep_hours: self.sleep_hours,
            calories: self.calories,
            exercise_minutes: self.exercise_minutes,
        };
        entry.validate()?;
        Ok(entry)
    }
}

/// Entry input and normalization errors.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    /// A required metric was not supplied.
    MissingField(Metric),
    /// A metric value is out of its allowed range.
    InvalidValue { metric: Metric, value: f64 },
    /// Calendar input could not be normalized to a date key.
    InvalidDate(String),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(metric) => write!(f, "`{}` is required", metric.as_str()),
            Self::InvalidValue { metric, value } => {
                write!(f, "invalid `{}` value: {value}", metric.as_str())
            }
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for EntryValidationError {}

fn check_value(metric: Metric, value: f64) -> Result<(), EntryValidationError> {
    let out_of_range = !value.is_finite()
        || value < 0.0
        || (metric == Metric::SleepHours && value > MAX_SLEEP_HOURS);
    if out_of_range {
        return Err(EntryValidationError::InvalidValue { metric, value });
    }
    Ok(())
}
