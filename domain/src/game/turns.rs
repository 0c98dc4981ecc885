//! Speaker selection for the discussion phase

use super::participant::{Participant, ParticipantId, Roster};
use rand::Rng;
use rand::seq::IteratorRandom;

/// Pick the next speaker uniformly at random, never the previous one.
///
/// `previous` is the author of the latest utterance, or `None` if that was
/// the narrator. A single-seat roster has no alternative and repeats.
pub fn next_speaker<'a, R: Rng + ?Sized>(
    roster: &'a Roster,
    previous: Option<&ParticipantId>,
    rng: &mut R,
) -> &'a Participant {
    roster
        .iter()
        .filter(|p| Some(&p.id) != previous)
        .choose(rng)
        .unwrap_or_else(|| roster.weak())
}
