//! Daily record session orchestration.
//!
//! # Responsibility
//! - Drive load → validate → save → evaluate → present for one user session.
//! - Expose the session state machine to the calendar UI.
//!
//! # Invariants
//! - Every failure resolves back to `Ready` (directly or after acknowledge).
//! - Exactly one evaluation, or none, is presented per completed save.
//! - Validation failures never touch the ledger.
//! - Dropping an in-flight `start`/`submit`/`reconcile` future abandons it;
//!   nothing from its repository call is applied afterwards.
//! - A session observed in `Loading`/`Saving` holds an abandoned operation;
//!   `acknowledge_error` recovers it.

use crate::engine::pipeline::{evaluate_day, DayEvaluation};
use crate::model::entry::{DateKey, EntryDraft, EntryValidationError};
use crate::model::evaluation::Evaluation;
use crate::repo::record_repo::{RecordRepository, RepoError};
use crate::store::record_store::{RecordStore, RetryReport, StoreError};
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Display collaborator receiving the chosen reaction.
pub trait FeedbackSink {
    fn present(&mut self, evaluation: &Evaluation);
}

impl FeedbackSink for Vec<Evaluation> {
    fn present(&mut self, evaluation: &Evaluation) {
        self.push(*evaluation);
    }
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    Saving,
    /// Load failed; the ledger is empty until acknowledged.
    LoadFailed,
    /// Remote write failed; the ledger kept the new value.
    SaveFailed,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Saving => "saving",
            Self::LoadFailed => "load_failed",
            Self::SaveFailed => "save_failed",
        }
    }
}

/// Session-level failures reported to the UI.
#[derive(Debug)]
pub enum SessionError {
    /// Required fields missing or out of range; prompt to complete the form.
    Validation(EntryValidationError),
    /// Listing failed; the session continues with an empty ledger.
    Load(RepoError),
    /// Remote write failed after the local update; retryable.
    Save { date: DateKey, source: RepoError },
    /// Operation not allowed in the current state.
    NotReady(SessionState),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "incomplete entry: {err}"),
            Self::Load(err) => write!(f, "could not load records: {err}"),
            Self::Save { date, source } => {
                write!(f, "saved {date} locally but could not sync: {source}")
            }
            Self::NotReady(state) => write!(f, "session is not ready (state: {})", state.as_str()),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Load(err) => Some(err),
            Self::Save { source, .. } => Some(source),
            Self::NotReady(_) => None,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            StoreError::LoadFailure(err) => Self::Load(err),
            StoreError::SaveFailure { date, source } => Self::Save { date, source },
        }
    }
}

/// One user session over the daily record ledger.
pub struct RecordSession<R: RecordRepository, D: FeedbackSink> {
    id: Uuid,
    state: SessionState,
    store: RecordStore<R>,
    sink: D,
    calorie_target: Option<f64>,
}

impl<R: RecordRepository, D: FeedbackSink> RecordSession<R, D> {
    /// Creates an idle session; call `start` to load records.
    pub fn new(repo: R, sink: D) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Idle,
            store: RecordStore::new(repo),
            sink,
            calorie_target: None,
        }
    }

    /// Enables calorie feedback against a daily target.
    pub fn with_calorie_target(mut self, target: Option<f64>) -> Self {
        self.calorie_target = target;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Loads the ledger. `Idle → Loading → Ready | LoadFailed`.
    ///
    /// # Errors
    /// - `NotReady` unless idle.
    /// - `Load` on repository failure; acknowledge to continue with an
    ///   empty ledger.
    pub async fn start(&mut self) -> Result<usize, SessionError> {
        self.require(SessionState::Idle)?;
        info!(
            "event=session_start module=session status=start session_id={}",
            self.id
        );

        self.state = SessionState::Loading;
        match self.store.load().await {
            Ok(count) => {
                self.state = SessionState::Ready;
                info!(
                    "event=session_start module=session status=ok session_id={} count={}",
                    self.id, count
                );
                Ok(count)
            }
            Err(err) => {
                self.state = SessionState::LoadFailed;
                warn!(
                    "event=session_start module=session status=error session_id={} error_code=load_failed",
                    self.id
                );
                Err(err.into())
            }
        }
    }

    /// Returns to `Ready` after a failed or abandoned operation.
    ///
    /// `Loading`/`Saving` can only be observed here once the operation's
    /// future was dropped. An abandoned load leaves the ledger empty; an
    /// abandoned save leaves its date pending for `reconcile`.
    pub fn acknowledge_error(&mut self) {
        match self.state {
            SessionState::LoadFailed | SessionState::SaveFailed => {}
            SessionState::Loading | SessionState::Saving => {
                warn!(
                    "event=session_recover module=session status=ok session_id={} abandoned={} pending={}",
                    self.id,
                    self.state.as_str(),
                    self.store.pending().len()
                );
            }
            SessionState::Idle | SessionState::Ready => return,
        }
        self.state = SessionState::Ready;
    }

    /// Saves one day's input and presents the selected feedback.
    ///
    /// Returns the evaluation breakdown that was presented, if any.
    ///
    /// `Ready → Saving → Ready` on success, `→ SaveFailed` on a remote
    /// failure. Validation failures stay in `Ready`.
    ///
    /// # Errors
    /// - `NotReady` unless ready.
    /// - `Validation` when weight or sleep is missing or out of range.
    /// - `Save` when the repository write fails; the ledger keeps the value
    ///   and no evaluation is presented.
    pub async fn submit(
        &mut self,
        draft: EntryDraft,
    ) -> Result<Option<DayEvaluation>, SessionError> {
        self.require(SessionState::Ready)?;

        let entry = match draft.validate() {
            Ok(entry) => entry,
            Err(err) => {
                info!(
                    "event=entry_submit module=session status=error session_id={} error_code=validation",
                    self.id
                );
                return Err(SessionError::Validation(err));
            }
        };
        let date = entry.date;

        self.state = SessionState::Saving;
        if let Err(err) = self.store.save(entry).await {
            self.state = match err {
                StoreError::Validation(_) => SessionState::Ready,
                _ => SessionState::SaveFailed,
            };
            return Err(err.into());
        }
        self.state = SessionState::Ready;

        let feedback = evaluate_day(self.store.ledger(), date, self.calorie_target);
        if let Some(result) = &feedback {
            self.sink.present(&result.selected);
        }
        info!(
            "event=entry_submit module=session status=ok session_id={} date={} category={}",
            self.id,
            date,
            feedback
                .as_ref()
                .map_or("none", |result| result.selected.category.as_str())
        );
        Ok(feedback)
    }

    /// Recomputes feedback for an already recorded day without presenting it.
    pub fn feedback_for(&self, date: DateKey) -> Option<DayEvaluation> {
        evaluate_day(self.store.ledger(), date, self.calorie_target)
    }

    /// Re-pushes entries whose remote write failed earlier.
    ///
    /// # Errors
    /// - `NotReady` unless ready.
    pub async fn reconcile(&mut self) -> Result<RetryReport, SessionError> {
        self.require(SessionState::Ready)?;
        self.state = SessionState::Saving;
        let report = self.store.retry_pending().await;
        self.state = SessionState::Ready;
        Ok(report)
    }

    /// Ends the session, discarding the ledger. Returns the display sink.
    pub fn teardown(self) -> D {
        info!(
            "event=session_end module=session status=ok session_id={} state={} pending={}",
            self.id,
            self.state.as_str(),
            self.store.pending().len()
        );
        self.sink
    }

    fn require(&self, expected: SessionState) -> Result<(), SessionError> {
        if self.state != expected {
            return Err(SessionError::NotReady(self.state));
        }
        Ok(())
    }
}
