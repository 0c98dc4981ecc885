//! Participants and the session roster

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Smallest lineup a session can start with
pub const MIN_PARTICIPANTS: usize = 3;
/// Largest lineup a session can start with
pub const MAX_PARTICIPANTS: usize = 10;

/// Display names, cycled by slot index
pub const PARTICIPANT_NAMES: &[&str] = &[
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
];

/// Persona tags distributed across participants
pub const PERSONAS: &[&str] = &[
    "Aggressive & Suspicious",
    "Chill & Observant",
    "Analytical & Precise",
    "Chaotic & Random",
    "Defensive & Nervous",
    "Sarcastic & Witty",
];

/// Display name for a roster slot
pub fn display_name_for_slot(slot: usize) -> &'static str {
    PARTICIPANT_NAMES[slot % PARTICIPANT_NAMES.len()]
}

/// Stable participant identifier (`agent-<slot>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn for_slot(slot: usize) -> Self {
        Self(format!("agent-{}", slot))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Secret role held by a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Tries to identify the weak participant
    Ordinary,
    /// The single impostor trying to avoid detection
    Weak,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Ordinary => "ordinary",
            Role::Weak => "weak",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A seat at the table, backed by one completion model (Entity)
///
/// Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub slot: usize,
    pub name: String,
    pub role: Role,
    pub model: Model,
    pub persona: String,
    pub strength: u32,
}

impl Participant {
    /// Create a participant for a slot; id and display name derive from the slot.
    pub fn new(slot: usize, role: Role, model: Model, persona: impl Into<String>) -> Self {
        let strength = model.strength();
        Self {
            id: ParticipantId::for_slot(slot),
            slot,
            name: display_name_for_slot(slot).to_string(),
            role,
            model,
            persona: persona.into(),
            strength,
        }
    }

    pub fn is_weak(&self) -> bool {
        self.role == Role::Weak
    }

    /// First half of the persona tag (`"Chill & Observant"` -> `"Chill"`)
    pub fn persona_short(&self) -> &str {
        self.persona.split('&').next().unwrap_or(&self.persona).trim()
    }
}

/// The full, ordered set of participants in a session
///
/// Invariant: exactly one participant holds [`Role::Weak`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Build a roster, checking the single-weak-participant invariant.
    pub fn new(participants: Vec<Participant>) -> Result<Self, DomainError> {
        if participants.is_empty() {
            return Err(DomainError::NoParticipants);
        }
        let weak_count = participants.iter().filter(|p| p.is_weak()).count();
        if weak_count != 1 {
            return Err(DomainError::WeakRoleCount(weak_count));
        }
        Ok(Self { participants })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Display name for an id, `"Unknown"` if the id is not seated
    pub fn name_of(&self, id: &ParticipantId) -> &str {
        self.get(id).map(|p| p.name.as_str()).unwrap_or("Unknown")
    }

    /// The weak participant
    pub fn weak(&self) -> &Participant {
        // Roster::new guarantees exactly one
        self.participants
            .iter()
            .find(|p| p.is_weak())
            .unwrap_or(&self.participants[0])
    }

    /// Everyone except the given participant
    pub fn others<'a>(&'a self, id: &'a ParticipantId) -> impl Iterator<Item = &'a Participant> {
        self.participants.iter().filter(move |p| &p.id != id)
    }

    /// Display names in roster order
    pub fn names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name.as_str()).collect()
    }
}
