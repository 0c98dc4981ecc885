//! The outcome of a completed session

use super::tally::{Side, eliminate, score, tally, winning_side};
use super::vote::Vote;
use crate::core::model::Model;
use crate::game::participant::{ParticipantId, Roster};
use crate::game::transcript::Transcript;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Justification recorded for a participant whose vote never arrived
pub const MISSING_VOTE: &str = "No vote recorded.";

const ORDINARY_WIN_REASON: &str =
    "Consensus Reached. The low-fidelity model was successfully identified.";
const WEAK_WIN_REASON: &str =
    "Evaluation Failed. The Traitor successfully mimicked high-fidelity behavior.";

/// Derived, immutable session outcome (Value Object)
///
/// Carries the roster and transcript so that consumers need no other
/// source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub winning_side: Side,
    pub weak_participant_id: ParticipantId,
    pub weak_model: Model,
    pub eliminated_id: Option<ParticipantId>,
    /// One vote per participant, in roster order
    pub votes: Vec<Vote>,
    pub vote_counts: Vec<(ParticipantId, usize)>,
    pub scores: BTreeMap<ParticipantId, u32>,
    pub reason: String,
    pub roster: Roster,
    pub transcript: Transcript,
}

impl SessionResult {
    /// Tally, decide and score a finished session.
    ///
    /// Votes are normalized first: one per seated participant, in roster
    /// order. A participant with no vote abstains; extra votes and votes
    /// from unknown voters are dropped.
    pub fn compute(roster: Roster, transcript: Transcript, votes: Vec<Vote>) -> Self {
        let votes = normalize_votes(&roster, votes);
        let vote_counts = tally(&roster, &votes);
        let eliminated_id = eliminate(&vote_counts);

        let weak = roster.weak();
        let winning_side = winning_side(eliminated_id.as_ref(), &weak.id);
        let scores = score(&roster, &votes, winning_side);
        let reason = match winning_side {
            Side::Ordinary => ORDINARY_WIN_REASON,
            Side::Weak => WEAK_WIN_REASON,
        }
        .to_string();

        Self {
            winning_side,
            weak_participant_id: weak.id.clone(),
            weak_model: weak.model.clone(),
            eliminated_id,
            votes,
            vote_counts,
            scores,
            reason,
            roster,
            transcript,
        }
    }

    pub fn weak_name(&self) -> &str {
        self.roster.name_of(&self.weak_participant_id)
    }

    pub fn eliminated_name(&self) -> Option<&str> {
        self.eliminated_id.as_ref().map(|id| self.roster.name_of(id))
    }

    pub fn score_of(&self, id: &ParticipantId) -> u32 {
        self.scores.get(id).copied().unwrap_or(0)
    }

    pub fn vote_of(&self, id: &ParticipantId) -> Option<&Vote> {
        self.votes.iter().find(|v| &v.voter == id)
    }
}

fn normalize_votes(roster: &Roster, votes: Vec<Vote>) -> Vec<Vote> {
    let mut by_voter: BTreeMap<ParticipantId, Vote> = BTreeMap::new();
    for vote in votes {
        if roster.get(&vote.voter).is_some() {
            // first vote per voter wins
            by_voter.entry(vote.voter.clone()).or_insert(vote);
        }
    }

    roster
        .iter()
        .map(|p| {
            by_voter
                .remove(&p.id)
                .unwrap_or_else(|| Vote::abstain(p.id.clone(), MISSING_VOTE))
        })
        .collect()
}
