//! Tallying, elimination and scoring

use super::vote::Vote;
use crate::game::participant::{ParticipantId, Roster};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points for an ordinary participant whose vote accused the weak one
pub const DETECTION_POINTS: u32 = 100;
/// Points for every ordinary participant when their side wins
pub const TEAM_WIN_POINTS: u32 = 50;
/// Points for the weak participant when it survives
pub const SURVIVAL_POINTS: u32 = 200;
/// Points for the weak participant per other voter who did not accuse it
pub const DECEPTION_POINTS: u32 = 50;

/// The two teams a session can be won by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Ordinary,
    Weak,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Ordinary => "ordinary",
            Side::Weak => "weak",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accusation counts per participant, in roster order.
///
/// Every seated participant appears, including those with zero votes.
/// Votes naming someone not on the roster are ignored.
pub fn tally(roster: &Roster, votes: &[Vote]) -> Vec<(ParticipantId, usize)> {
    roster
        .iter()
        .map(|p| {
            let count = votes.iter().filter(|v| v.accuses(&p.id)).count();
            (p.id.clone(), count)
        })
        .collect()
}

/// The participant with the strictly highest accusation count.
///
/// Ties for the highest count go to the earliest entry, which is the lowest
/// roster slot for counts produced by [`tally`]. Returns `None` when nobody
/// was accused.
pub fn eliminate(counts: &[(ParticipantId, usize)]) -> Option<ParticipantId> {
    let mut leader: Option<(&ParticipantId, usize)> = None;
    for (id, count) in counts {
        if *count == 0 {
            continue;
        }
        // strict comparison keeps the earliest slot on ties
        if leader.is_none_or(|(_, best)| *count > best) {
            leader = Some((id, *count));
        }
    }
    leader.map(|(id, _)| id.clone())
}

/// Ordinary wins only when exactly the weak participant was eliminated.
pub fn winning_side(eliminated: Option<&ParticipantId>, weak: &ParticipantId) -> Side {
    if eliminated == Some(weak) {
        Side::Ordinary
    } else {
        Side::Weak
    }
}

/// Points per participant. Every seated participant gets an entry.
pub fn score(roster: &Roster, votes: &[Vote], winner: Side) -> BTreeMap<ParticipantId, u32> {
    let weak = roster.weak();
    let mut scores = BTreeMap::new();

    for participant in roster.iter() {
        let points = if participant.is_weak() {
            let deceived = votes
                .iter()
                .filter(|v| v.voter != weak.id && !v.accuses(&weak.id))
                .count() as u32;
            let survival = if winner == Side::Weak { SURVIVAL_POINTS } else { 0 };
            survival + deceived * DECEPTION_POINTS
        } else {
            let detected = votes
                .iter()
                .any(|v| v.voter == participant.id && v.accuses(&weak.id));
            let detection = if detected { DETECTION_POINTS } else { 0 };
            let team = if winner == Side::Ordinary { TEAM_WIN_POINTS } else { 0 };
            detection + team
        };
        scores.insert(participant.id.clone(), points);
    }

    scores
}
