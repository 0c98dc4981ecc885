//! Collect Vote use case
//!
//! Asks one participant for its ballot and interprets the reply. A voter that
//! cannot be reached abstains; it never holds up the tally.

use crate::config::SessionParams;
use crate::ports::completion_provider::{CompletionProvider, CompletionRequest};
use tracing::{debug, info, warn};
use traitor_domain::voting::BRAIN_FREEZE;
use traitor_domain::{
    ChatMessage, ParseStrategy, Participant, PromptTemplate, Roster, Transcript, Vote,
    build_history, interpret_ballot,
};

/// Request one ballot from `voter`. Never fails.
///
/// The voter sees the full transcript framed from its own point of view,
/// followed by the voting directive as the final user turn.
pub async fn collect_vote(
    provider: &dyn CompletionProvider,
    voter: &Participant,
    roster: &Roster,
    topic: &str,
    transcript: &Transcript,
    params: &SessionParams,
) -> Vote {
    let mut history = build_history(voter, roster, transcript.utterances());
    history.push(ChatMessage::user(PromptTemplate::voting_directive(voter)));

    let request = CompletionRequest::new(
        voter.model.clone(),
        PromptTemplate::role_system(voter, roster, topic),
        history,
        params.vote_params(),
    );

    let call = tokio::time::timeout(params.request_timeout, provider.complete(&request));
    let response = match call.await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(participant = %voter.name, model = %voter.model, "Vote request failed: {}", e);
            return Vote::abstain(voter.id.clone(), BRAIN_FREEZE);
        }
        Err(_) => {
            warn!(
                participant = %voter.name,
                model = %voter.model,
                "Vote request timed out after {:?}",
                params.request_timeout
            );
            return Vote::abstain(voter.id.clone(), BRAIN_FREEZE);
        }
    };

    // rng is dropped before returning; nothing below awaits
    let outcome = interpret_ballot(voter, roster, &response, &mut rand::thread_rng());

    if outcome.strategy == ParseStrategy::Fallback {
        warn!(participant = %voter.name, "Could not parse ballot: {:?}", response.trim());
    }
    if outcome.redirected {
        info!(participant = %voter.name, "Self-vote redirected");
    }
    debug!(
        participant = %voter.name,
        strategy = ?outcome.strategy,
        accused = %outcome.vote.accused().map(|id| roster.name_of(id)).unwrap_or("abstain"),
        "Vote cast"
    );

    outcome.vote
}
