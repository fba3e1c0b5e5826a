//! Deterministic feedback engine.
//!
//! # Responsibility
//! - Compute day-over-day deltas from the ledger.
//! - Classify metric values into catalog categories.
//! - Reduce per-metric evaluations into the single reaction shown to the user.
//!
//! # Invariants
//! - Every function here is pure and total: no I/O, no failure paths.
//! - An absent delta ("no history") is never conflated with a zero delta.

pub mod delta;
pub mod evaluator;
pub mod pipeline;
pub mod selector;
