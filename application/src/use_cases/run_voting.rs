//! Run Voting use case
//!
//! Every participant votes at once. All ballots are awaited before the tally;
//! a failing voter settles as an abstention rather than an error, so the
//! phase always completes.

use crate::config::SessionParams;
use crate::ports::completion_provider::CompletionProvider;
use crate::ports::session_observer::SessionObserver;
use crate::use_cases::collect_vote::collect_vote;
use futures::future::join_all;
use tracing::info;
use traitor_domain::{Roster, Transcript, Vote};

/// Collect one vote per participant concurrently, in roster order.
pub async fn run_voting(
    provider: &dyn CompletionProvider,
    roster: &Roster,
    topic: &str,
    transcript: &Transcript,
    params: &SessionParams,
    observer: &dyn SessionObserver,
) -> Vec<Vote> {
    info!("Voting: {} ballots requested", roster.len());

    let ballots = roster.iter().map(|voter| async move {
        let vote = collect_vote(provider, voter, roster, topic, transcript, params).await;
        observer.on_vote_cast(voter, &vote);
        vote
    });

    let votes = join_all(ballots).await;

    let abstentions = votes.iter().filter(|v| v.is_abstain()).count();
    info!(abstentions, "Voting complete");
    votes
}
