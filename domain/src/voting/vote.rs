//! Vote types for the accusation phase

use crate::game::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Justification recorded when the provider could not be reached at all
pub const BRAIN_FREEZE: &str = "Brain freeze.";
/// Justification used when a ballot names someone but gives no reason
pub const GUT_FEELING: &str = "Gut feeling.";
/// Prefix marking a vote that was moved off the voter itself
pub const SELF_VOTE_REDIRECT_PREFIX: &str = "(Redirected from self-vote) ";

/// Whom a vote points at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accusation {
    Accused(ParticipantId),
    Abstain,
}

/// A single participant's accusation (Value Object)
///
/// # Example
///
/// ```
/// use traitor_domain::game::ParticipantId;
/// use traitor_domain::voting::Vote;
///
/// let vote = Vote::accuse(ParticipantId::for_slot(0), ParticipantId::for_slot(2), "too vague");
/// assert!(vote.accuses(&ParticipantId::for_slot(2)));
///
/// let abstain = Vote::abstain(ParticipantId::for_slot(1), "Brain freeze.");
/// assert!(abstain.is_abstain());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: ParticipantId,
    pub accusation: Accusation,
    pub justification: String,
}

impl Vote {
    pub fn accuse(
        voter: ParticipantId,
        accused: ParticipantId,
        justification: impl Into<String>,
    ) -> Self {
        Self {
            voter,
            accusation: Accusation::Accused(accused),
            justification: justification.into(),
        }
    }

    pub fn abstain(voter: ParticipantId, justification: impl Into<String>) -> Self {
        Self {
            voter,
            accusation: Accusation::Abstain,
            justification: justification.into(),
        }
    }

    pub fn accused(&self) -> Option<&ParticipantId> {
        match &self.accusation {
            Accusation::Accused(id) => Some(id),
            Accusation::Abstain => None,
        }
    }

    pub fn is_abstain(&self) -> bool {
        matches!(self.accusation, Accusation::Abstain)
    }

    pub fn accuses(&self, id: &ParticipantId) -> bool {
        self.accused() == Some(id)
    }
}
