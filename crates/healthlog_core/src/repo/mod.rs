//! Record persistence collaborator contracts and implementations.
//!
//! # Responsibility
//! - Define the list/upsert contract the record store depends on.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Read paths reject invalid persisted data instead of masking it.
//! - Records are scoped to one owner; other owners' rows are never visible.

pub mod record_repo;
