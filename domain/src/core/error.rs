//! Domain error types

use crate::game::phase::SessionPhase;
use thiserror::Error;

/// Domain-level errors
///
/// These only arise while a session is being set up; once a session is
/// running, provider failures are absorbed by fallbacks instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No participants configured")]
    NoParticipants,

    #[error("At least {min} participants are required, got {actual}")]
    TooFewParticipants { min: usize, actual: usize },

    #[error("At most {max} participants are allowed, got {actual}")]
    TooManyParticipants { max: usize, actual: usize },

    #[error("Exactly one weak participant is required, found {0}")]
    WeakRoleCount(usize),

    #[error("Discussion topic must not be empty")]
    EmptyTopic,

    #[error("Illegal phase transition: {from} -> {to}")]
    IllegalTransition { from: SessionPhase, to: SessionPhase },

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
