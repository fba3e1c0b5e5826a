//! Priority reduction of per-metric evaluations.

use crate::model::evaluation::{Category, Evaluation};

/// Picks the single reaction to show after a save.
///
/// Priority, first match wins:
/// 1. `SLEEP_LOW`
/// 2. `WEIGHT_UP`
/// 3. `CALORIE_OVER` (only when a calorie evaluation is supplied)
/// 4. `WEIGHT_DOWN`
/// 5. the sleep evaluation
pub fn select_overall(
    weight: Evaluation,
    calorie: Option<Evaluation>,
    sleep: Evaluation,
) -> Evaluation {
    if sleep.category == Category::SleepLow {
        return sleep;
    }
    if weight.category == Category::WeightUp {
        return weight;
    }
    if let Some(calorie) = calorie.filter(|eval| eval.category == Category::CalorieOver) {
        return calorie;
    }
    if weight.category == Category::WeightDown {
        return weight;
    }
    sleep
}
