//! Role assignment by declared model strength
//!
//! The weakest declared model always becomes the deduction target. When
//! several slots share the minimum strength, one of them is picked uniformly
//! at random. Personas are dealt from a shuffled, cyclically extended deck.

use super::participant::{PERSONAS, Participant, Role, Roster};
use crate::core::error::DomainError;
use crate::core::model::Model;
use rand::Rng;
use rand::seq::SliceRandom;

/// Slots whose model shares the minimum declared strength
pub fn weakest_slots(models: &[Model]) -> Vec<usize> {
    let Some(min_strength) = models.iter().map(Model::strength).min() else {
        return Vec::new();
    };
    models
        .iter()
        .enumerate()
        .filter(|(_, m)| m.strength() == min_strength)
        .map(|(slot, _)| slot)
        .collect()
}

/// Persona tags for `count` slots: the persona list repeated until long
/// enough, truncated, then shuffled independently of role selection.
pub fn deal_personas<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<String> {
    let mut deck: Vec<String> = PERSONAS
        .iter()
        .cycle()
        .take(count)
        .map(|p| p.to_string())
        .collect();
    deck.shuffle(rng);
    deck
}

/// Seat one participant per model, exactly one of them [`Role::Weak`].
pub fn assign_roles<R: Rng + ?Sized>(models: &[Model], rng: &mut R) -> Result<Roster, DomainError> {
    let candidates = weakest_slots(models);
    let weak_slot = *candidates.choose(rng).ok_or(DomainError::NoParticipants)?;
    let personas = deal_personas(models.len(), rng);

    let participants = models
        .iter()
        .zip(personas)
        .enumerate()
        .map(|(slot, (model, persona))| {
            let role = if slot == weak_slot {
                Role::Weak
            } else {
                Role::Ordinary
            };
            Participant::new(slot, role, model.clone(), persona)
        })
        .collect();

    Roster::new(participants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn models(ids: &[&str]) -> Vec<Model> {
        ids.iter().map(|id| Model::new(*id)).collect()
    }

    #[test]
    fn test_unique_minimum_is_always_weak() {
        let lineup = models(&["gpt-4o-mini", "ministral-3b", "gemini-2.5-flash"]);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let roster = assign_roles(&lineup, &mut rng).unwrap();
            assert_eq!(roster.weak().slot, 1);
            assert_eq!(roster.iter().filter(|p| p.is_weak()).count(), 1);
        }
    }

    #[test]
    fn test_unknown_model_counts_as_weakest() {
        let lineup = models(&["ministral-3b", "my-local-llama", "gpt-4o-mini"]);
        let mut rng = StdRng::seed_from_u64(7);
        let roster = assign_roles(&lineup, &mut rng).unwrap();
        assert_eq!(roster.weak().model.as_str(), "my-local-llama");
    }

    #[test]
    fn test_tied_minimum_is_roughly_uniform() {
        let lineup = models(&["gpt-4.1-nano", "gpt-4o-mini", "gpt-4.1-nano", "gpt-4.1-nano"]);
        assert_eq!(weakest_slots(&lineup), vec![0, 2, 3]);

        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = [0usize; 4];
        let trials = 3000;
        for _ in 0..trials {
            let roster = assign_roles(&lineup, &mut rng).unwrap();
            hits[roster.weak().slot] += 1;
        }

        assert_eq!(hits[1], 0);
        for slot in [0, 2, 3] {
            // expected 1000 each
            assert!(hits[slot] > 850 && hits[slot] < 1150, "slot {} hit {}", slot, hits[slot]);
        }
    }

    #[test]
    fn test_names_cycle_and_personas_cover_slots() {
        let lineup = models(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let mut rng = StdRng::seed_from_u64(1);
        let roster = assign_roles(&lineup, &mut rng).unwrap();

        assert_eq!(roster.len(), 8);
        assert_eq!(roster.participants()[0].name, "Alpha");
        assert_eq!(roster.participants()[7].name, "Theta");

        // 8 slots over 6 personas: every persona appears, two appear twice
        let mut personas: Vec<_> = roster.iter().map(|p| p.persona.clone()).collect();
        personas.sort();
        personas.dedup();
        assert_eq!(personas.len(), PERSONAS.len());
    }

    #[test]
    fn test_empty_lineup_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            assign_roles(&[], &mut rng).unwrap_err(),
            DomainError::NoParticipants
        );
    }
}
