//! Run Discussion use case
//!
//! The turn scheduler. Owns the transcript for the duration of the
//! discussion and appends exactly one utterance per completed turn, one
//! generation in flight at a time.
//!
//! Cancellation is observed at the top of every turn, during the thinking
//! pause, before every provider attempt and while a call is in flight. A
//! reply that arrives after cancellation is dropped, never appended.

use crate::config::SessionParams;
use crate::ports::completion_provider::CompletionProvider;
use crate::ports::session_observer::SessionObserver;
use crate::use_cases::generate_response::generate_response;
use crate::use_cases::run_session::RunSessionError;
use crate::use_cases::shared::{cancellable_sleep, check_cancelled};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use traitor_domain::{Participant, Roster, Transcript, next_speaker};

/// Run `params.max_turns` discussion turns, appending to `transcript`.
///
/// Returns `Err(Cancelled)` as soon as cancellation is observed; the
/// transcript then holds only the turns that completed before it.
pub async fn run_discussion(
    provider: &dyn CompletionProvider,
    roster: &Roster,
    topic: &str,
    transcript: &mut Transcript,
    params: &SessionParams,
    observer: &dyn SessionObserver,
    cancellation: &Option<CancellationToken>,
) -> Result<(), RunSessionError> {
    for turn in 1..=params.max_turns {
        check_cancelled(cancellation)?;

        let (speaker, delay) = {
            let mut rng = rand::thread_rng();
            let speaker = next_speaker(roster, transcript.last_speaker(), &mut rng);
            (speaker, params.sample_thinking_delay(&mut rng))
        };

        debug!(participant = %speaker.name, turn, "Speaker selected");
        observer.on_speaker_start(speaker, turn, params.max_turns);

        let result = take_turn(
            provider,
            speaker,
            roster,
            topic,
            transcript,
            params,
            delay,
            cancellation,
        )
        .await;
        observer.on_speaker_end(speaker);

        match result {
            Ok(text) => {
                let utterance = transcript.append(speaker.id.clone(), text);
                observer.on_utterance(speaker, utterance);
            }
            Err(e) => {
                info!(participant = %speaker.name, turn, "Discussion cancelled mid-turn");
                return Err(e);
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn take_turn(
    provider: &dyn CompletionProvider,
    speaker: &Participant,
    roster: &Roster,
    topic: &str,
    transcript: &Transcript,
    params: &SessionParams,
    delay: std::time::Duration,
    cancellation: &Option<CancellationToken>,
) -> Result<String, RunSessionError> {
    cancellable_sleep(delay, cancellation).await?;

    let response =
        generate_response(provider, speaker, roster, topic, transcript, params, cancellation)
            .await?;

    // in-flight reply after cancellation is discarded
    check_cancelled(cancellation)?;
    Ok(response.text)
}
