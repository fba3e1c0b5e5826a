//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and engine calls into session-level APIs.
//! - Keep UI layers decoupled from storage details.

pub mod record_session;
