//! Day-over-day change computation.

use crate::model::entry::{DateKey, Metric};
use crate::store::ledger::Ledger;

/// Returns `current - previous` for `metric` on `date`.
///
/// Returns `None` when either the day itself or the exact previous calendar
/// day lacks a value for the metric. A gap is never bridged by an older day.
pub fn compute_delta(ledger: &Ledger, date: DateKey, metric: Metric) -> Option<f64> {
    let current = ledger.get(date)?.metric(metric)?;
    let previous = ledger.get_previous(date)?.metric(metric)?;
    Some(current - previous)
}
