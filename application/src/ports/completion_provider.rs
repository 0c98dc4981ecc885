//! Completion provider port
//!
//! Defines the single capability the game needs from a language model:
//! turn a system instruction plus chat history into one text reply.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use traitor_domain::{ChatMessage, Model};

/// Errors that can occur during a completion call
///
/// None of these are fatal to a session: the use cases retry and then fall
/// back to filler text or an abstention.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Empty response")]
    EmptyResponse,

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Missing API key for {provider} (set {env_var})")]
    MissingApiKey { provider: String, env_var: String },

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Output shape hint for providers that support structured output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
}

/// Sampling parameters for one call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub response_format: Option<ResponseFormat>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.95,
            max_tokens: 1000,
            response_format: None,
        }
    }
}

impl GenerationParams {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            response_format: None,
        }
    }

    pub fn json(mut self) -> Self {
        self.response_format = Some(ResponseFormat::Json);
        self
    }

    pub fn wants_json(&self) -> bool {
        self.response_format == Some(ResponseFormat::Json)
    }
}

/// One completion call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: Model,
    pub system_instruction: String,
    pub history: Vec<ChatMessage>,
    pub params: GenerationParams,
}

impl CompletionRequest {
    pub fn new(
        model: Model,
        system_instruction: impl Into<String>,
        history: Vec<ChatMessage>,
        params: GenerationParams,
    ) -> Self {
        Self {
            model,
            system_instruction: system_instruction.into(),
            history,
            params,
        }
    }
}

/// Gateway to language-model completions
///
/// This port defines how the application layer talks to model providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a request and return the reply text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}
