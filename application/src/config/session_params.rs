//! Session parameters: use case loop control.
//!
//! [`SessionParams`] groups the static knobs that control a session run:
//! turn count, pacing delays, per-call timeout, retries and sampling.
//! These are application-layer concerns, not game rules.

use crate::ports::completion_provider::GenerationParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Number of discussion turns before voting.
    pub max_turns: usize,
    /// Pause after the opening line, before the first speaker.
    pub start_delay: Duration,
    /// Lower bound of the cosmetic per-turn "thinking" pause.
    pub thinking_delay_min: Duration,
    /// Upper bound of the cosmetic per-turn "thinking" pause.
    pub thinking_delay_max: Duration,
    /// Bound on each individual completion call.
    pub request_timeout: Duration,
    /// Extra attempts after the first failed discussion call.
    pub max_retries: usize,
    /// Sampling temperature for discussion turns.
    pub response_temperature: f32,
    /// Sampling temperature for ballots.
    pub vote_temperature: f32,
    /// Output token cap per call.
    pub max_tokens: u32,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            max_turns: 15,
            start_delay: Duration::from_millis(1000),
            thinking_delay_min: Duration::from_millis(800),
            thinking_delay_max: Duration::from_millis(2000),
            request_timeout: Duration::from_secs(45),
            max_retries: 2,
            response_temperature: 0.95,
            vote_temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

impl SessionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn with_thinking_delay(mut self, min: Duration, max: Duration) -> Self {
        self.thinking_delay_min = min;
        self.thinking_delay_max = max;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperatures(mut self, response: f32, vote: f32) -> Self {
        self.response_temperature = response;
        self.vote_temperature = vote;
        self
    }

    /// No pacing delays at all (tests, batch runs)
    pub fn without_delays(self) -> Self {
        self.with_start_delay(Duration::ZERO)
            .with_thinking_delay(Duration::ZERO, Duration::ZERO)
    }

    // ==================== Derived Values ====================

    /// Attempts per discussion turn, counting the first.
    pub fn attempts(&self) -> usize {
        self.max_retries + 1
    }

    pub fn response_params(&self) -> GenerationParams {
        GenerationParams::new(self.response_temperature, self.max_tokens)
    }

    pub fn vote_params(&self) -> GenerationParams {
        GenerationParams::new(self.vote_temperature, self.max_tokens).json()
    }

    /// Pick a thinking delay in `[min, max]`. An inverted range collapses to `min`.
    pub fn sample_thinking_delay<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let min = self.thinking_delay_min.as_millis() as u64;
        let max = self.thinking_delay_max.as_millis() as u64;
        if max <= min {
            return self.thinking_delay_min;
        }
        Duration::from_millis(rng.gen_range(min..=max))
    }
}
