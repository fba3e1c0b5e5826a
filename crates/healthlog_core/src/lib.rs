//! Core domain logic for the daily health log.
//! This crate is the single source of truth for record and feedback invariants.

pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use engine::delta::compute_delta;
pub use engine::evaluator::{
    evaluate_calorie_intake, evaluate_sleep_time, evaluate_weight_change, evaluate_weight_delta,
};
pub use engine::pipeline::{evaluate_day, DayEvaluation};
pub use engine::selector::select_overall;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entry::{DateKey, Entry, EntryDraft, EntryValidationError, Metric};
pub use model::evaluation::{Category, Evaluation};
pub use repo::record_repo::{
    RecordRepository, RemoteRecord, RepoError, RepoResult, SqliteRecordRepository,
};
pub use service::record_session::{FeedbackSink, RecordSession, SessionError, SessionState};
pub use store::ledger::Ledger;
pub use store::record_store::{
    RecordStore, RetryReport, SeriesPoint, SeriesWindow, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
