//! Session phase state machine
//!
//! ```text
//! Idle ──▶ Running ──▶ Voting ──▶ Complete
//!   │         │
//!   └────┬────┘
//!        ▼
//!    Cancelled
//! ```
//!
//! `Complete` and `Cancelled` are terminal. Only a session that reaches
//! `Complete` produces a result.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Running,
    Voting,
    Complete,
    Cancelled,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Running => "running",
            SessionPhase::Voting => "voting",
            SessionPhase::Complete => "complete",
            SessionPhase::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Running => "Discussion",
            SessionPhase::Voting => "Voting",
            SessionPhase::Complete => "Complete",
            SessionPhase::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Complete | SessionPhase::Cancelled)
    }

    pub fn can_transition_to(self, next: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, next),
            (Idle, Running) | (Idle, Cancelled) | (Running, Voting) | (Running, Cancelled) | (Voting, Complete)
        )
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Current phase plus the guarded transition into the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTracker {
    current: SessionPhase,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self {
            current: SessionPhase::Idle,
        }
    }
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> SessionPhase {
        self.current
    }

    /// Move to `next`, rejecting transitions the state machine does not allow.
    pub fn advance(&mut self, next: SessionPhase) -> Result<(), DomainError> {
        if !self.current.can_transition_to(next) {
            return Err(DomainError::IllegalTransition {
                from: self.current,
                to: next,
            });
        }
        self.current = next;
        Ok(())
    }

    /// Enter `Cancelled`. Repeated cancellation, or cancelling a finished
    /// session, leaves the phase untouched.
    pub fn cancel(&mut self) -> bool {
        if self.current.can_transition_to(SessionPhase::Cancelled) {
            self.current = SessionPhase::Cancelled;
            true
        } else {
            false
        }
    }
}
