//! Delta → evaluate → select sequence for one recorded day.

use crate::engine::delta::compute_delta;
use crate::engine::evaluator::{evaluate_calorie_intake, evaluate_sleep_time, evaluate_weight_delta};
use crate::engine::selector::select_overall;
use crate::model::entry::{DateKey, Metric};
use crate::model::evaluation::Evaluation;
use crate::store::ledger::Ledger;
use serde::Serialize;

/// Full breakdown of one day's feedback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayEvaluation {
    pub date: DateKey,
    /// `None` when the previous calendar day has no weight.
    pub weight_delta: Option<f64>,
    pub weight: Evaluation,
    pub sleep: Evaluation,
    /// Present only when a calorie target is configured and calories were recorded.
    pub calorie: Option<Evaluation>,
    /// The one evaluation handed to the display collaborator.
    pub selected: Evaluation,
}

/// Runs the feedback rules for `date` against the ledger.
///
/// Returns `None` when the day has no entry or lacks weight or sleep.
pub fn evaluate_day(
    ledger: &Ledger,
    date: DateKey,
    calorie_target: Option<f64>,
) -> Option<DayEvaluation> {
    let entry = ledger.get(date)?;
    entry.weight?;
    let sleep_hours = entry.sleep_hours?;

    let weight_delta = compute_delta(ledger, date, Metric::Weight);
    let weight = evaluate_weight_delta(weight_delta);
    let sleep = evaluate_sleep_time(sleep_hours);
    let calorie = match (entry.calories, calorie_target) {
        (Some(intake), Some(target)) => Some(evaluate_calorie_intake(intake, target)),
        _ => None,
    };
    let selected = select_overall(weight, calorie, sleep);

    Some(DayEvaluation {
        date,
        weight_delta,
        weight,
        sleep,
        calorie,
        selected,
    })
}
