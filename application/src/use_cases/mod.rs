//! Use cases (application services)
//!
//! | Use case | Role |
//! |----------|------|
//! | [`run_session`] | Full game: validation, roles, discussion, voting, result |
//! | [`run_discussion`] | Turn scheduler owning the transcript |
//! | [`generate_response`] | One utterance with retries and filler fallback |
//! | [`run_voting`] | Concurrent ballot collection |
//! | [`collect_vote`] | One ballot, abstaining on failure |

pub mod collect_vote;
pub mod generate_response;
pub mod run_discussion;
pub mod run_session;
pub mod run_voting;
pub(crate) mod shared;
