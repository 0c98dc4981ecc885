//! Voting phase: ballots, tallying and scoring

pub mod parsing;
pub mod result;
pub mod tally;
pub mod vote;

pub use parsing::{Ballot, BallotOutcome, ParseStrategy, interpret_ballot, parse_ballot, resolve_suspect};
pub use result::SessionResult;
pub use tally::Side;
pub use vote::{Accusation, BRAIN_FREEZE, GUT_FEELING, Vote};
