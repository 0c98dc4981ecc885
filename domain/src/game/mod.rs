//! Game setup and timeline
//!
//! - [`participant`]: participants, roles, and the roster
//! - [`roles`]: strength-based role assignment
//! - [`transcript`]: the append-only utterance log
//! - [`phase`]: the `Idle → Running → Voting → Complete` state machine
//! - [`turns`]: discussion speaker selection

pub mod participant;
pub mod phase;
pub mod roles;
pub mod transcript;
pub mod turns;

pub use participant::{
    MAX_PARTICIPANTS, MIN_PARTICIPANTS, Participant, ParticipantId, Role, Roster,
};
pub use phase::{PhaseTracker, SessionPhase};
pub use roles::assign_roles;
pub use transcript::{Author, Transcript, Utterance};
pub use turns::next_speaker;
