use super::{ProviderAdapter, ProviderKind, build_adapters};
use crate::config::FileProvidersConfig;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use traitor_application::{CompletionProvider, CompletionRequest, ProviderError};
use traitor_domain::{ConfigIssue, ConfigIssueCode, Model};

pub struct RoutingProvider {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    /// Model id to index into `providers`, from `[providers.routing]`
    explicit_model_routing: HashMap<String, usize>,
    default_kind: ProviderKind,
}

impl RoutingProvider {
    pub fn new(
        providers: Vec<Arc<dyn ProviderAdapter>>,
        default: Option<&str>,
        routing: &HashMap<String, String>,
    ) -> Self {
        let mut explicit_model_routing = HashMap::new();

        for (model_name, provider_name) in routing {
            let Some(target_kind) = ProviderKind::parse(provider_name) else {
                warn!(model = %model_name, "Unknown provider '{}' in routing, ignored", provider_name);
                continue;
            };

            if let Some(idx) = providers.iter().position(|p| p.kind() == target_kind) {
                explicit_model_routing.insert(model_name.clone(), idx);
            }
        }

        Self {
            providers,
            explicit_model_routing,
            default_kind: default.and_then(ProviderKind::parse).unwrap_or_default(),
        }
    }

    /// Register every provider kind from the `[providers]` section
    pub fn from_config(config: &FileProvidersConfig) -> Self {
        Self::new(
            build_adapters(config),
            config.default.as_deref(),
            &config.routing,
        )
    }

    /// Pick the provider for `model`.
    ///
    /// Priority:
    ///  1. explicit routing entry for the model id
    ///  2. model family (`gemini*` / `gemma*` to Google, `groq/` prefix to Groq)
    ///  3. the configured default kind
    ///  4. the first registered provider
    ///  5. `ModelNotAvailable` when nothing is registered
    fn resolve_provider(&self, model: &Model) -> Result<&dyn ProviderAdapter, ProviderError> {
        if let Some(&idx) = self.explicit_model_routing.get(model.as_str()) {
            return Ok(self.providers[idx].as_ref());
        }

        if let Some(kind) = infer_kind(model)
            && let Some(p) = self.providers.iter().find(|p| p.kind() == kind)
        {
            return Ok(p.as_ref());
        }

        if let Some(p) = self.providers.iter().find(|p| p.kind() == self.default_kind) {
            return Ok(p.as_ref());
        }

        self.providers
            .first()
            .map(|p| p.as_ref())
            .ok_or_else(|| ProviderError::ModelNotAvailable(model.to_string()))
    }

    /// One warning per distinct model whose provider has no API key
    ///
    /// Missing keys do not abort a session: those seats fall back to canned
    /// lines and abstain from voting.
    pub fn credential_issues(&self, models: &[Model]) -> Vec<ConfigIssue> {
        let mut seen = std::collections::HashSet::new();
        models
            .iter()
            .filter(|m| seen.insert(m.as_str()))
            .filter_map(|model| {
                let provider = self.resolve_provider(model).ok()?;
                let err = provider.credential_check().err()?;
                Some(ConfigIssue::warning(
                    ConfigIssueCode::MissingApiKey,
                    format!("{}: {}", model, err),
                ))
            })
            .collect()
    }
}

fn infer_kind(model: &Model) -> Option<ProviderKind> {
    if model.provider_prefix() == Some("groq") {
        Some(ProviderKind::Groq)
    } else if model.is_google() {
        Some(ProviderKind::Google)
    } else {
        None
    }
}

#[async_trait]
impl CompletionProvider for RoutingProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let provider = self.resolve_provider(&request.model)?;
        debug!(model = %request.model, provider = %provider.kind(), "Routing completion");
        provider.complete(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traitor_application::GenerationParams;

    struct MockProvider {
        kind: ProviderKind,
    }

    impl MockProvider {
        fn new(kind: ProviderKind) -> Arc<dyn ProviderAdapter> {
            Arc::new(Self { kind })
        }
    }

    #[async_trait]
    impl CompletionProvider for MockProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
            Ok(self.kind.as_str().to_string())
        }
    }

    impl ProviderAdapter for MockProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }
    }

    fn no_routing() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn explicit_routing_takes_highest_priority() {
        // gemini would infer to Google, but the routing table says OpenRouter
        let providers = vec![
            MockProvider::new(ProviderKind::Google),
            MockProvider::new(ProviderKind::OpenRouter),
        ];
        let routing = HashMap::from([(
            "gemini-2.5-flash".to_string(),
            "openrouter".to_string(),
        )]);
        let router = RoutingProvider::new(providers, None, &routing);

        let provider = router.resolve_provider(&Model::new("gemini-2.5-flash")).unwrap();
        assert_eq!(provider.kind(), ProviderKind::OpenRouter);
    }

    #[test]
    fn gemini_and_gemma_infer_to_google() {
        let providers = vec![
            MockProvider::new(ProviderKind::Gateway),
            MockProvider::new(ProviderKind::Google),
        ];
        let router = RoutingProvider::new(providers, None, &no_routing());

        for id in ["gemini-2.0-flash", "gemma-2-9b-it"] {
            let provider = router.resolve_provider(&Model::new(id)).unwrap();
            assert_eq!(provider.kind(), ProviderKind::Google, "{}", id);
        }
    }

    #[test]
    fn groq_prefix_wins_over_google_family() {
        let providers = vec![
            MockProvider::new(ProviderKind::Google),
            MockProvider::new(ProviderKind::Groq),
        ];
        let router = RoutingProvider::new(providers, None, &no_routing());

        let provider = router.resolve_provider(&Model::new("groq/gemma-2-9b-it")).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Groq);
    }

    #[test]
    fn falls_back_to_default_kind_when_no_family_match() {
        let providers = vec![
            MockProvider::new(ProviderKind::Gateway),
            MockProvider::new(ProviderKind::OpenAi),
        ];
        let router = RoutingProvider::new(providers, Some("openai"), &no_routing());

        let provider = router.resolve_provider(&Model::new("gpt-4o-mini")).unwrap();
        assert_eq!(provider.kind(), ProviderKind::OpenAi);
    }

    #[test]
    fn google_falls_through_to_default_without_google_provider() {
        let providers = vec![
            MockProvider::new(ProviderKind::OpenRouter),
            MockProvider::new(ProviderKind::Gateway),
        ];
        let router = RoutingProvider::new(providers, None, &no_routing());

        let provider = router.resolve_provider(&Model::new("gemini-2.5-flash")).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Gateway);
    }

    #[test]
    fn falls_back_to_first_provider_when_default_unavailable() {
        let providers = vec![MockProvider::new(ProviderKind::Groq)];
        let router = RoutingProvider::new(providers, Some("openai"), &no_routing());

        let provider = router.resolve_provider(&Model::new("gpt-4o-mini")).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Groq);
    }

    #[test]
    fn empty_providers_returns_model_not_available() {
        let router = RoutingProvider::new(vec![], None, &no_routing());

        let result = router.resolve_provider(&Model::new("gpt-4o-mini"));
        assert!(matches!(result, Err(ProviderError::ModelNotAvailable(_))));
    }

    #[test]
    fn unknown_routing_provider_name_is_ignored() {
        let providers = vec![MockProvider::new(ProviderKind::Gateway)];
        let routing = HashMap::from([("gpt-4o".to_string(), "azure".to_string())]);
        let router = RoutingProvider::new(providers, None, &routing);

        assert!(router.explicit_model_routing.is_empty());
    }

    struct KeylessProvider;

    #[async_trait]
    impl CompletionProvider for KeylessProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
            Err(ProviderError::MissingApiKey {
                provider: "google".to_string(),
                env_var: "GEMINI_API_KEY".to_string(),
            })
        }
    }

    impl ProviderAdapter for KeylessProvider {
        fn kind(&self) -> ProviderKind {
            ProviderKind::Google
        }

        fn credential_check(&self) -> Result<(), ProviderError> {
            Err(ProviderError::MissingApiKey {
                provider: "google".to_string(),
                env_var: "GEMINI_API_KEY".to_string(),
            })
        }
    }

    #[test]
    fn credential_issues_name_each_affected_model_once() {
        let providers: Vec<Arc<dyn ProviderAdapter>> = vec![
            MockProvider::new(ProviderKind::Gateway),
            Arc::new(KeylessProvider),
        ];
        let router = RoutingProvider::new(providers, None, &no_routing());
        let models = [
            Model::new("gpt-4o-mini"),
            Model::new("gemini-2.5-flash"),
            Model::new("gemini-2.5-flash"),
        ];

        let issues = router.credential_issues(&models);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::MissingApiKey);
        assert!(issues[0].message.contains("gemini-2.5-flash"));
        assert!(issues[0].message.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn from_config_registers_every_kind_and_honours_routing() {
        let config = FileProvidersConfig {
            default: Some("openrouter".to_string()),
            routing: HashMap::from([("gpt-4.1-nano".to_string(), "groq".to_string())]),
            ..Default::default()
        };
        let router = RoutingProvider::from_config(&config);

        assert_eq!(router.providers.len(), ProviderKind::ALL.len());
        let kind_of = |id: &str| router.resolve_provider(&Model::new(id)).unwrap().kind();
        assert_eq!(kind_of("gpt-4.1-nano"), ProviderKind::Groq);
        assert_eq!(kind_of("gemini-2.5-flash"), ProviderKind::Google);
        assert_eq!(kind_of("gpt-4o-mini"), ProviderKind::OpenRouter);
    }

    #[tokio::test]
    async fn complete_delegates_to_resolved_provider() {
        let providers = vec![
            MockProvider::new(ProviderKind::Gateway),
            MockProvider::new(ProviderKind::Google),
        ];
        let router = RoutingProvider::new(providers, None, &no_routing());
        let request = CompletionRequest::new(
            Model::new("gemini-2.5-flash"),
            "s",
            vec![],
            GenerationParams::default(),
        );

        assert_eq!(router.complete(&request).await.unwrap(), "google");
    }
}
