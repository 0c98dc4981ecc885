//! Completion provider adapters
//!
//! Every adapter implements the application's [`CompletionProvider`] port and
//! reports its [`ProviderKind`] so that the [`RoutingProvider`] can pick one
//! per model.

pub mod chat_completions;
pub mod gemini;
pub mod routing;

pub use chat_completions::ChatCompletionsAdapter;
pub use gemini::GeminiAdapter;
pub use routing::RoutingProvider;

use crate::config::FileProvidersConfig;
use serde_json::Value;
use std::sync::Arc;
use traitor_application::{CompletionProvider, ProviderError};
use traitor_domain::core::string::truncate;

/// Error bodies are cut to this many characters before they reach logs
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    /// OpenAI-compatible AI gateway fronting many vendors
    #[default]
    Gateway,
    OpenAi,
    Groq,
    OpenRouter,
    Google,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::Gateway,
        ProviderKind::OpenAi,
        ProviderKind::Groq,
        ProviderKind::OpenRouter,
        ProviderKind::Google,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gateway => "gateway",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Groq => "groq",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Google => "google",
        }
    }

    /// Parse a provider name as written in config (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "gateway" => Some(ProviderKind::Gateway),
            "openai" => Some(ProviderKind::OpenAi),
            "groq" => Some(ProviderKind::Groq),
            "openrouter" => Some(ProviderKind::OpenRouter),
            "google" | "gemini" => Some(ProviderKind::Google),
            _ => None,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gateway => "https://ai-gateway.vercel.sh/v1",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
            ProviderKind::OpenRouter => "https://openrouter.ai/api/v1",
            ProviderKind::Google => "https://generativelanguage.googleapis.com",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Gateway => "AI_GATEWAY_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
            ProviderKind::Google => "GEMINI_API_KEY",
        }
    }

    /// Whether the provider honours `response_format: {type: json_object}`
    pub fn supports_json_mode(&self) -> bool {
        matches!(self, ProviderKind::OpenAi | ProviderKind::Groq)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completion provider that knows which backend it talks to
pub trait ProviderAdapter: CompletionProvider {
    fn kind(&self) -> ProviderKind;

    /// `Err(MissingApiKey)` when a call would fail for lack of credentials
    fn credential_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Where and how to reach one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    pub base_url: String,
    /// Name of the environment variable the key was (or should be) read from
    pub api_key_env: String,
    pub api_key: Option<String>,
}

impl ProviderEndpoint {
    /// Resolve the key: explicit value first, then the environment variable.
    pub fn resolve(base_url: &str, api_key_env: &str, api_key: Option<&str>) -> Self {
        let api_key = api_key
            .map(str::to_string)
            .or_else(|| std::env::var(api_key_env).ok())
            .filter(|k| !k.trim().is_empty());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key_env: api_key_env.to_string(),
            api_key,
        }
    }

    fn require_key(&self, kind: ProviderKind) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: kind.as_str().to_string(),
                env_var: self.api_key_env.clone(),
            })
    }
}

/// Build one adapter per provider kind from the `[providers]` section
///
/// Every kind is registered even without a key; a keyless adapter fails
/// at call time with `MissingApiKey`, which the session treats like any
/// other transport failure.
pub fn build_adapters(config: &FileProvidersConfig) -> Vec<Arc<dyn ProviderAdapter>> {
    let client = reqwest::Client::new();
    ProviderKind::ALL
        .iter()
        .map(|&kind| {
            let endpoint = config.endpoint(kind);
            let adapter: Arc<dyn ProviderAdapter> = match kind {
                ProviderKind::Google => Arc::new(GeminiAdapter::new(client.clone(), endpoint)),
                _ => Arc::new(ChatCompletionsAdapter::new(kind, client.clone(), endpoint)),
            };
            adapter
        })
        .collect()
}

/// Send a prepared request and decode a JSON body, mapping failures onto
/// [`ProviderError`].
pub(crate) async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, ProviderError> {
    let response = request.send().await.map_err(transport_error)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Http {
            status: status.as_u16(),
            body: truncate(body.trim(), MAX_ERROR_BODY),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ProviderError::Other(format!("Invalid response body: {}", e)))
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_connect() || e.is_timeout() {
        ProviderError::Connection(e.to_string())
    } else {
        ProviderError::RequestFailed(e.to_string())
    }
}
