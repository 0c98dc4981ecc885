//! Generate Response use case
//!
//! Produces one discussion utterance for a speaker. Transport failures,
//! timeouts and degenerate output ("...", ".", blank) are retried; when every
//! attempt fails, a canned filler line is used so the turn always yields text.
//!
//! Cancellation is checked before every attempt and raced against every
//! in-flight call, so no new request goes out once the session is cancelled.

use crate::config::SessionParams;
use crate::ports::completion_provider::{CompletionProvider, CompletionRequest, ProviderError};
use crate::use_cases::run_session::RunSessionError;
use crate::use_cases::shared::check_cancelled;
use rand::seq::SliceRandom;
use tokio::time::error::Elapsed;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use traitor_domain::core::string::{is_degenerate, truncate};
use traitor_domain::{FALLBACK_RESPONSES, Participant, PromptTemplate, Roster, Transcript, build_history};

/// Used only if the fallback table were ever empty
const LAST_RESORT: &str = "Thinking...";

/// One generated utterance and how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedResponse {
    pub text: String,
    /// Provider calls made, including the successful one
    pub attempts: usize,
    /// True when every attempt failed and a filler line was substituted
    pub used_fallback: bool,
}

/// Generate the next utterance for `speaker`.
///
/// Provider failures never surface; the only error is `Cancelled`.
pub async fn generate_response(
    provider: &dyn CompletionProvider,
    speaker: &Participant,
    roster: &Roster,
    topic: &str,
    transcript: &Transcript,
    params: &SessionParams,
    cancellation: &Option<CancellationToken>,
) -> Result<GeneratedResponse, RunSessionError> {
    let request = CompletionRequest::new(
        speaker.model.clone(),
        PromptTemplate::turn_system(speaker, roster, topic),
        build_history(speaker, roster, transcript.utterances()),
        params.response_params(),
    );

    let attempts = params.attempts();
    for attempt in 1..=attempts {
        check_cancelled(cancellation)?;
        match timed_call(provider, &request, params, cancellation).await? {
            Ok(Ok(text)) if !is_degenerate(&text) => {
                debug!(
                    participant = %speaker.name,
                    model = %speaker.model,
                    attempt,
                    "Received: {}",
                    truncate(text.trim(), 50)
                );
                return Ok(GeneratedResponse {
                    text: text.trim().to_string(),
                    attempts: attempt,
                    used_fallback: false,
                });
            }
            Ok(Ok(text)) => {
                warn!(
                    participant = %speaker.name,
                    model = %speaker.model,
                    attempt,
                    max_attempts = attempts,
                    "Degenerate response {:?}, retrying",
                    truncate(&text, 20)
                );
            }
            Ok(Err(e)) => {
                warn!(
                    participant = %speaker.name,
                    model = %speaker.model,
                    attempt,
                    max_attempts = attempts,
                    "Completion failed: {}",
                    e
                );
            }
            Err(_) => {
                warn!(
                    participant = %speaker.name,
                    model = %speaker.model,
                    attempt,
                    max_attempts = attempts,
                    "Completion timed out after {:?}",
                    params.request_timeout
                );
            }
        }
    }

    let text = pick_fallback();
    warn!(participant = %speaker.name, "All attempts failed, using filler: {}", text);
    Ok(GeneratedResponse {
        text,
        attempts,
        used_fallback: true,
    })
}

/// Reply or provider error, or `Elapsed` when the call ran past the timeout
type CallOutcome = Result<Result<String, ProviderError>, Elapsed>;

/// One provider call bounded by the request timeout, abandoned on cancel
async fn timed_call(
    provider: &dyn CompletionProvider,
    request: &CompletionRequest,
    params: &SessionParams,
    cancellation: &Option<CancellationToken>,
) -> Result<CallOutcome, RunSessionError> {
    let call = tokio::time::timeout(params.request_timeout, provider.complete(request));
    match cancellation {
        Some(token) => tokio::select! {
            _ = token.cancelled() => Err(RunSessionError::Cancelled),
            outcome = call => Ok(outcome),
        },
        None => Ok(call.await),
    }
}

fn pick_fallback() -> String {
    FALLBACK_RESPONSES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(LAST_RESORT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedProvider, Step, text, three_seat_roster};
    use std::time::Duration;
    use traitor_domain::ChatRole;

    fn params() -> SessionParams {
        SessionParams::default().without_delays()
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let provider = ScriptedProvider::new().script("strong-a", vec![text("  pineapple is fine  ")]);
        let roster = three_seat_roster();
        let transcript = Transcript::open("pineapple on pizza");

        let response = generate_response(
            &provider,
            &roster.participants()[0],
            &roster,
            "pineapple on pizza",
            &transcript,
            &params(),
            &None,
        )
        .await
        .unwrap();

        assert_eq!(response.text, "pineapple is fine");
        assert_eq!(response.attempts, 1);
        assert!(!response.used_fallback);

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].system_instruction.contains("Your name is Alpha."));
        assert_eq!(calls[0].history.len(), 1);
        assert_eq!(calls[0].history[0].role, ChatRole::User);
        assert!(calls[0].history[0].content.starts_with("GAME MASTER: Protocol Start."));
        assert!(!calls[0].params.wants_json());
    }

    #[tokio::test]
    async fn test_degenerate_output_is_retried() {
        let provider = ScriptedProvider::new()
            .script("strong-a", vec![text("..."), text("."), text("ok real answer")]);
        let roster = three_seat_roster();

        let response = generate_response(
            &provider,
            &roster.participants()[0],
            &roster,
            "t",
            &Transcript::open("t"),
            &params(),
            &None,
        )
        .await
        .unwrap();

        assert_eq!(response.text, "ok real answer");
        assert_eq!(response.attempts, 3);
        assert!(!response.used_fallback);
    }

    #[tokio::test]
    async fn test_all_errors_use_fallback() {
        let provider = ScriptedProvider::with_fallback(Step::Error("boom".into()));
        let roster = three_seat_roster();

        let response = generate_response(
            &provider,
            &roster.participants()[1],
            &roster,
            "t",
            &Transcript::open("t"),
            &params(),
            &None,
        )
        .await
        .unwrap();

        assert!(response.used_fallback);
        assert!(FALLBACK_RESPONSES.contains(&response.text.as_str()));
        assert_eq!(provider.calls_for("weak-b"), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_as_failed_attempt() {
        let provider = ScriptedProvider::new().script("strong-c", vec![Step::Hang, text("late but here")]);
        let roster = three_seat_roster();
        let params = params().with_request_timeout(Duration::from_secs(45));

        let response = generate_response(
            &provider,
            &roster.participants()[2],
            &roster,
            "t",
            &Transcript::open("t"),
            &params,
            &None,
        )
        .await
        .unwrap();

        assert_eq!(response.text, "late but here");
        assert_eq!(response.attempts, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_call_stops_retries() {
        let provider = ScriptedProvider::with_fallback(Step::Hang);
        let roster = three_seat_roster();
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            canceller.cancel();
        });

        let started = tokio::time::Instant::now();
        let result = generate_response(
            &provider,
            &roster.participants()[0],
            &roster,
            "t",
            &Transcript::open("t"),
            &params().with_request_timeout(Duration::from_secs(45)),
            &Some(token),
        )
        .await;

        assert!(matches!(result, Err(RunSessionError::Cancelled)));
        assert_eq!(provider.calls().len(), 1);
        assert!(started.elapsed() < Duration::from_secs(45));
    }

    #[tokio::test]
    async fn test_cancelled_token_makes_no_call() {
        let provider = ScriptedProvider::new();
        let roster = three_seat_roster();
        let token = CancellationToken::new();
        token.cancel();

        let result = generate_response(
            &provider,
            &roster.participants()[0],
            &roster,
            "t",
            &Transcript::open("t"),
            &params(),
            &Some(token),
        )
        .await;

        assert!(matches!(result, Err(RunSessionError::Cancelled)));
        assert!(provider.calls().is_empty());
    }
}
