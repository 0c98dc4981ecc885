//! Shared utilities for use cases.
//!
//! Cancellation checks and a cancellable pacing sleep, used by the
//! discussion loop and the session driver.

use crate::use_cases::run_session::RunSessionError;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(RunSessionError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), RunSessionError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(RunSessionError::Cancelled);
    }
    Ok(())
}

/// Sleep for `duration`, returning early with `Cancelled` if the token fires.
pub(crate) async fn cancellable_sleep(
    duration: Duration,
    token: &Option<CancellationToken>,
) -> Result<(), RunSessionError> {
    check_cancelled(token)?;
    if duration.is_zero() {
        return Ok(());
    }
    match token {
        Some(token) => tokio::select! {
            _ = token.cancelled() => Err(RunSessionError::Cancelled),
            _ = tokio::time::sleep(duration) => Ok(()),
        },
        None => {
            tokio::time::sleep(duration).await;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_cancelled() {
        assert!(check_cancelled(&None).is_ok());

        let token = CancellationToken::new();
        assert!(check_cancelled(&Some(token.clone())).is_ok());
        token.cancel();
        assert!(matches!(
            check_cancelled(&Some(token)),
            Err(RunSessionError::Cancelled)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_interrupted_by_cancel() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result = cancellable_sleep(Duration::from_secs(3600), &Some(token)).await;
        assert!(matches!(result, Err(RunSessionError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_completes_without_token() {
        assert!(cancellable_sleep(Duration::from_secs(5), &None).await.is_ok());
    }
}
