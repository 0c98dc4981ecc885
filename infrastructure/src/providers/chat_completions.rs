//! OpenAI-compatible chat completions adapter
//!
//! Serves the AI gateway, OpenAI, Groq and OpenRouter, which all accept
//! `POST {base_url}/chat/completions` with a bearer key.

use super::{ProviderAdapter, ProviderEndpoint, ProviderKind, send_json};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;
use traitor_application::{CompletionProvider, CompletionRequest, ProviderError};
use traitor_domain::Model;

const OPENROUTER_REFERER: &str = "https://github.com/turing-traitor/turing-traitor";
const OPENROUTER_TITLE: &str = "Turing Traitor Game";

pub struct ChatCompletionsAdapter {
    kind: ProviderKind,
    client: reqwest::Client,
    endpoint: ProviderEndpoint,
}

impl ChatCompletionsAdapter {
    pub fn new(kind: ProviderKind, client: reqwest::Client, endpoint: ProviderEndpoint) -> Self {
        Self {
            kind,
            client,
            endpoint,
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.endpoint.base_url)
    }
}

/// The model id as the backend expects it.
///
/// A prefix naming this very provider (`groq/gemma-2-9b-it` on Groq) is a
/// routing hint and is stripped; vendor prefixes (`openai/gpt-4o` on a
/// gateway) are part of the id and kept.
fn wire_model(kind: ProviderKind, model: &Model) -> &str {
    match model.provider_prefix() {
        Some(prefix) if ProviderKind::parse(prefix) == Some(kind) => model
            .as_str()
            .split_once('/')
            .map_or(model.as_str(), |(_, rest)| rest),
        _ => model.as_str(),
    }
}

pub(crate) fn request_body(kind: ProviderKind, request: &CompletionRequest) -> Value {
    let mut messages = Vec::with_capacity(request.history.len() + 1);
    messages.push(json!({
        "role": "system",
        "content": request.system_instruction,
    }));
    messages.extend(request.history.iter().map(|m| {
        json!({
            "role": m.role.as_str(),
            "content": m.content,
        })
    }));

    let mut body = json!({
        "model": wire_model(kind, &request.model),
        "messages": messages,
        "temperature": request.params.temperature,
        "max_tokens": request.params.max_tokens,
    });

    if request.params.wants_json() && kind.supports_json_mode() {
        body["response_format"] = json!({ "type": "json_object" });
    }

    body
}

pub(crate) fn response_text(body: &Value) -> Result<String, ProviderError> {
    match body["choices"][0]["message"]["content"].as_str() {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(ProviderError::EmptyResponse),
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionsAdapter {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let key = self.endpoint.require_key(self.kind)?;
        let body = request_body(self.kind, request);

        debug!(
            provider = %self.kind,
            model = %request.model,
            messages = request.history.len() + 1,
            "Sending chat completion"
        );

        let mut http = self
            .client
            .post(self.url())
            .header("Authorization", format!("Bearer {}", key))
            .json(&body);
        if self.kind == ProviderKind::OpenRouter {
            http = http
                .header("HTTP-Referer", OPENROUTER_REFERER)
                .header("X-Title", OPENROUTER_TITLE);
        }

        let json = send_json(http).await?;
        response_text(&json)
    }
}

impl ProviderAdapter for ChatCompletionsAdapter {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn credential_check(&self) -> Result<(), ProviderError> {
        self.endpoint.require_key(self.kind).map(|_| ())
    }
}
