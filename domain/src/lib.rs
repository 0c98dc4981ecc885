//! Domain layer for turing-traitor
//!
//! This crate contains the game rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## The Game
//!
//! N participants, each backed by a completion model, discuss a topic.
//! Exactly one of them, the one running the weakest declared model, plays
//! the **Weak** role and tries to blend in. Everyone else is **Ordinary**
//! and tries to spot it.
//!
//! - **Discussion**: a fixed number of turns, one speaker at a time, never
//!   the same speaker twice in a row
//! - **Voting**: everyone accuses someone (or abstains) at once
//! - **Scoring**: Ordinary wins only if exactly the weak participant is
//!   eliminated

pub mod config;
pub mod core;
pub mod game;
pub mod prompt;
pub mod session;
pub mod voting;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model};
pub use game::{
    Author, MAX_PARTICIPANTS, MIN_PARTICIPANTS, Participant, ParticipantId, PhaseTracker, Role,
    Roster, SessionPhase, Transcript, Utterance, assign_roles, next_speaker,
};
pub use prompt::{FALLBACK_RESPONSES, PromptTemplate};
pub use session::{ChatMessage, ChatRole, build_history};
pub use voting::{
    Accusation, Ballot, BallotOutcome, ParseStrategy, SessionResult, Side, Vote, interpret_ballot,
    parse_ballot,
};
