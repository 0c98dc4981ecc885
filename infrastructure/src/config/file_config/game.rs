//! Game pacing and sampling from TOML (`[game]` section)
//!
//! ```toml
//! [game]
//! max_turns = 15
//! start_delay_ms = 1000
//! thinking_delay_min_ms = 800
//! thinking_delay_max_ms = 2000
//! request_timeout_secs = 45
//! max_retries = 2
//! response_temperature = 0.95
//! vote_temperature = 0.7
//! max_tokens = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use traitor_application::SessionParams;
use traitor_domain::{ConfigIssue, ConfigIssueCode};

/// Turn counts above this are allowed but almost certainly a typo
const SOFT_MAX_TURNS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    pub max_turns: usize,
    pub start_delay_ms: u64,
    pub thinking_delay_min_ms: u64,
    pub thinking_delay_max_ms: u64,
    pub request_timeout_secs: u64,
    pub max_retries: usize,
    pub response_temperature: f32,
    pub vote_temperature: f32,
    pub max_tokens: u32,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        let params = SessionParams::default();
        Self {
            max_turns: params.max_turns,
            start_delay_ms: params.start_delay.as_millis() as u64,
            thinking_delay_min_ms: params.thinking_delay_min.as_millis() as u64,
            thinking_delay_max_ms: params.thinking_delay_max.as_millis() as u64,
            request_timeout_secs: params.request_timeout.as_secs(),
            max_retries: params.max_retries,
            response_temperature: params.response_temperature,
            vote_temperature: params.vote_temperature,
            max_tokens: params.max_tokens,
        }
    }
}

impl FileGameConfig {
    pub fn to_session_params(&self) -> SessionParams {
        SessionParams::default()
            .with_max_turns(self.max_turns)
            .with_start_delay(Duration::from_millis(self.start_delay_ms))
            .with_thinking_delay(
                Duration::from_millis(self.thinking_delay_min_ms),
                Duration::from_millis(self.thinking_delay_max_ms),
            )
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_max_retries(self.max_retries)
            .with_temperatures(self.response_temperature, self.vote_temperature)
            .with_max_tokens(self.max_tokens)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.max_turns == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::TurnCountOutOfRange,
                "game.max_turns must be at least 1",
            ));
        } else if self.max_turns > SOFT_MAX_TURNS {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TurnCountOutOfRange,
                format!(
                    "game.max_turns = {} is unusually long (over {})",
                    self.max_turns, SOFT_MAX_TURNS
                ),
            ));
        }

        if self.thinking_delay_min_ms > self.thinking_delay_max_ms {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvertedDelayRange,
                format!(
                    "game.thinking_delay_min_ms ({}) exceeds thinking_delay_max_ms ({}); the minimum is used",
                    self.thinking_delay_min_ms, self.thinking_delay_max_ms
                ),
            ));
        }

        if self.request_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "game.request_timeout_secs cannot be 0",
            ));
        }

        issues
    }
}
