//! Per-metric classification rules.
//!
//! # Invariants
//! - Weight boundaries (±0.3 kg) belong to the change categories.
//! - Sleep boundaries: 7h is good, 5h is ok.
//! - Calorie boundaries (±10 %) belong to the balanced category.

use crate::model::evaluation::{Category, Evaluation};

pub const WEIGHT_CHANGE_THRESHOLD_KG: f64 = 0.3;
pub const SLEEP_GOOD_HOURS: f64 = 7.0;
pub const SLEEP_MIN_HOURS: f64 = 5.0;
pub const CALORIE_TOLERANCE_PERCENT: f64 = 10.0;

/// Slack absorbing `f64` subtraction noise at the weight boundaries.
/// `69.7 - 70.0` is `-0.29999999999999716`.
const FLOAT_NOISE_KG: f64 = 1e-9;

/// Classifies today's weight against the previous day's weight.
///
/// `previous = None` means there is no prior-day record.
pub fn evaluate_weight_change(current: f64, previous: Option<f64>) -> Evaluation {
    evaluate_weight_delta(previous.map(|previous| current - previous))
}

/// Classifies an already computed weight delta.
pub fn evaluate_weight_delta(delta: Option<f64>) -> Evaluation {
    let category = match delta {
        None => Category::FirstRecord,
        Some(delta) if delta <= -(WEIGHT_CHANGE_THRESHOLD_KG - FLOAT_NOISE_KG) => {
            Category::WeightDown
        }
        Some(delta) if delta >= WEIGHT_CHANGE_THRESHOLD_KG - FLOAT_NOISE_KG => Category::WeightUp,
        Some(_) => Category::WeightStable,
    };
    category.evaluation()
}

/// Classifies one night's sleep duration in hours.
pub fn evaluate_sleep_time(hours: f64) -> Evaluation {
    let category = if hours >= SLEEP_GOOD_HOURS {
        Category::SleepGood
    } else if hours >= SLEEP_MIN_HOURS {
        Category::SleepOk
    } else {
        Category::SleepLow
    };
    category.evaluation()
}

/// Classifies calorie intake relative to a daily target.
///
/// A non-positive or non-finite target gives no basis for comparison and
/// yields `CALORIE_BALANCED`.
pub fn evaluate_calorie_intake(intake: f64, target: f64) -> Evaluation {
    if !target.is_finite() || target <= 0.0 {
        return Category::CalorieBalanced.evaluation();
    }

    let diff_percent = (intake - target) * 100.0 / target;
    let category = if diff_percent < -CALORIE_TOLERANCE_PERCENT {
        Category::CalorieUnder
    } else if diff_percent > CALORIE_TOLERANCE_PERCENT {
        Category::CalorieOver
    } else {
        Category::CalorieBalanced
    };
    category.evaluation()
}
