//! Domain model for daily health records and coach feedback.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the single date normalization path (`DateKey`).
//!
//! # Invariants
//! - Every entry is identified by exactly one calendar-day `DateKey`.
//! - Evaluations are immutable values drawn from a fixed catalog.

pub mod entry;
pub mod evaluation;
