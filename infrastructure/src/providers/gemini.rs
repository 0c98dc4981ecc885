//! Google Gemini adapter (`generateContent` REST endpoint)

use super::{ProviderAdapter, ProviderEndpoint, ProviderKind, send_json};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;
use traitor_application::{CompletionProvider, CompletionRequest, ProviderError};
use traitor_domain::ChatRole;

pub struct GeminiAdapter {
    client: reqwest::Client,
    endpoint: ProviderEndpoint,
}

impl GeminiAdapter {
    pub fn new(client: reqwest::Client, endpoint: ProviderEndpoint) -> Self {
        Self { client, endpoint }
    }

    fn url(&self, request: &CompletionRequest) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.base_url,
            request.model.base_name()
        )
    }
}

/// Gemini calls the assistant side `model`
fn gemini_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    }
}

pub(crate) fn request_body(request: &CompletionRequest) -> Value {
    let contents: Vec<Value> = request
        .history
        .iter()
        .map(|m| {
            json!({
                "role": gemini_role(m.role),
                "parts": [{ "text": m.content }],
            })
        })
        .collect();

    let mut generation_config = json!({
        "temperature": request.params.temperature,
        "maxOutputTokens": request.params.max_tokens,
    });
    if request.params.wants_json() {
        generation_config["responseMimeType"] = json!("application/json");
    }

    json!({
        "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
        "contents": contents,
        "generationConfig": generation_config,
    })
}

/// Concatenate the text parts of the first candidate.
pub(crate) fn response_text(body: &Value) -> Result<String, ProviderError> {
    if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
        return Err(ProviderError::Other(format!("Prompt blocked: {}", reason)));
    }

    let text: String = body["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[async_trait]
impl CompletionProvider for GeminiAdapter {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let key = self.endpoint.require_key(ProviderKind::Google)?;
        let body = request_body(request);

        debug!(
            provider = "google",
            model = %request.model,
            contents = request.history.len(),
            "Sending generateContent"
        );

        let http = self
            .client
            .post(self.url(request))
            .header("x-goog-api-key", key)
            .json(&body);

        let json = send_json(http).await?;
        response_text(&json)
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }

    fn credential_check(&self) -> Result<(), ProviderError> {
        self.endpoint.require_key(ProviderKind::Google).map(|_| ())
    }
}
