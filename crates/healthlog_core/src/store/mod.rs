//! Session-owned record state.
//!
//! # Responsibility
//! - Keep the date-keyed ledger of entries for the current session.
//! - Reconcile the ledger with the record repository (load, write-through).
//!
//! # Invariants
//! - At most one entry per `DateKey`; writes are last-write-wins.
//! - Ledger mutation only happens through `RecordStore`.

pub mod ledger;
pub mod record_store;
