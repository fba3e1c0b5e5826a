//! Date-keyed entry ledger.

use crate::model::entry::{DateKey, Entry};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Ordered mapping from calendar day to that day's entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: BTreeMap<DateKey, Entry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: DateKey) -> Option<&Entry> {
        self.entries.get(&date)
    }

    /// Returns the entry for exactly one calendar day before `date`.
    pub fn get_previous(&self, date: DateKey) -> Option<&Entry> {
        self.get(date.previous()?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Iterates entries whose date falls in `range`, ascending.
    pub fn range(&self, range: RangeInclusive<DateKey>) -> impl Iterator<Item = &Entry> {
        self.entries.range(range).map(|(_, entry)| entry)
    }

    /// Inserts or replaces the entry for its date.
    pub(crate) fn upsert(&mut self, entry: Entry) {
        self.entries.insert(entry.date, entry);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<Entry> for Ledger {
    /// Later entries for the same date replace earlier ones.
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        let mut ledger = Self::new();
        for entry in iter {
            ledger.upsert(entry);
        }
        ledger
    }
}
