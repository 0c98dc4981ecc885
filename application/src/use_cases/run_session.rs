//! Run Session use case
//!
//! Drives one full game:
//!
//! ```text
//! validate → assign roles → Running (discussion) → Voting → Complete
//!                                   │
//!                                   └─ cancelled → Cancelled (no result)
//! ```
//!
//! Setup problems are the only fatal errors. Once the discussion starts, a
//! session either produces a [`SessionResult`] or ends cancelled.

use crate::config::SessionParams;
use crate::ports::completion_provider::CompletionProvider;
use crate::ports::session_observer::{NoObserver, SessionObserver};
use crate::use_cases::run_discussion::run_discussion;
use crate::use_cases::run_voting::run_voting;
use crate::use_cases::shared::cancellable_sleep;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use traitor_domain::{
    DomainError, MAX_PARTICIPANTS, MIN_PARTICIPANTS, Model, PhaseTracker, SessionPhase,
    SessionResult, Transcript, assign_roles,
};

/// Errors that can occur while running a session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunSessionError {
    #[error("No models configured")]
    NoParticipants,

    #[error("At least {min} participants are required, got {actual}")]
    TooFewParticipants { min: usize, actual: usize },

    #[error("At most {max} participants are allowed, got {actual}")]
    TooManyParticipants { max: usize, actual: usize },

    #[error("Discussion topic must not be empty")]
    EmptyTopic,

    #[error("Session cancelled")]
    Cancelled,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl RunSessionError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunSessionError::Cancelled)
    }
}

/// Input for the RunSession use case
#[derive(Debug, Clone)]
pub struct RunSessionInput {
    /// Discussion topic
    pub topic: String,
    /// One model per seat, in slot order
    pub models: Vec<Model>,
    pub params: SessionParams,
}

impl RunSessionInput {
    pub fn new(topic: impl Into<String>, models: Vec<Model>) -> Self {
        Self {
            topic: topic.into(),
            models,
            params: SessionParams::default(),
        }
    }

    pub fn with_params(mut self, params: SessionParams) -> Self {
        self.params = params;
        self
    }

    /// Check lineup size and topic before anything is spent on providers.
    pub fn validate(&self) -> Result<(), RunSessionError> {
        let actual = self.models.len();
        if actual == 0 {
            return Err(RunSessionError::NoParticipants);
        }
        if actual < MIN_PARTICIPANTS {
            return Err(RunSessionError::TooFewParticipants {
                min: MIN_PARTICIPANTS,
                actual,
            });
        }
        if actual > MAX_PARTICIPANTS {
            return Err(RunSessionError::TooManyParticipants {
                max: MAX_PARTICIPANTS,
                actual,
            });
        }
        if self.topic.trim().is_empty() {
            return Err(RunSessionError::EmptyTopic);
        }
        Ok(())
    }
}

/// Use case for running a full session
pub struct RunSessionUseCase<P: CompletionProvider + 'static> {
    provider: Arc<P>,
    cancellation_token: Option<CancellationToken>,
}

impl<P: CompletionProvider + 'static> Clone for RunSessionUseCase<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}

impl<P: CompletionProvider + 'static> RunSessionUseCase<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with no observer
    pub async fn execute(&self, input: RunSessionInput) -> Result<SessionResult, RunSessionError> {
        self.execute_with_observer(input, &NoObserver).await
    }

    /// Execute the use case, reporting progress to `observer`
    pub async fn execute_with_observer(
        &self,
        input: RunSessionInput,
        observer: &dyn SessionObserver,
    ) -> Result<SessionResult, RunSessionError> {
        input.validate()?;
        let RunSessionInput {
            topic,
            models,
            params,
        } = input;
        let topic = topic.trim().to_string();

        let roster = assign_roles(&models, &mut rand::thread_rng())?;
        info!(
            "Starting session with {} participants on {:?}",
            roster.len(),
            topic
        );
        for p in roster.iter() {
            debug!(
                participant = %p.name,
                model = %p.model,
                role = %p.role,
                strength = p.strength,
                persona = %p.persona,
                "Seated"
            );
        }

        let mut phase = PhaseTracker::new();
        let mut transcript = Transcript::open(&topic);

        phase.advance(SessionPhase::Running)?;
        observer.on_phase_change(SessionPhase::Running);
        if let Some(opening) = transcript.last() {
            observer.on_narration(opening);
        }

        let provider: &dyn CompletionProvider = &*self.provider;
        let token = &self.cancellation_token;

        let discussion = match cancellable_sleep(params.start_delay, token).await {
            Ok(()) => {
                run_discussion(
                    provider,
                    &roster,
                    &topic,
                    &mut transcript,
                    &params,
                    observer,
                    token,
                )
                .await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = discussion {
            if e.is_cancelled() && phase.cancel() {
                info!(
                    turns = transcript.participant_turns(),
                    "Session cancelled during discussion"
                );
                observer.on_phase_change(SessionPhase::Cancelled);
            }
            return Err(e);
        }

        phase.advance(SessionPhase::Voting)?;
        observer.on_phase_change(SessionPhase::Voting);

        let votes = run_voting(provider, &roster, &topic, &transcript, &params, observer).await;
        let result = SessionResult::compute(roster, transcript, votes);

        phase.advance(SessionPhase::Complete)?;
        observer.on_phase_change(SessionPhase::Complete);
        info!(
            winner = %result.winning_side,
            eliminated = result.eliminated_name().unwrap_or("nobody"),
            weak = result.weak_name(),
            "Session complete"
        );
        observer.on_result(&result);

        Ok(result)
    }
}
