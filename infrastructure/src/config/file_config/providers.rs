//! Provider configuration from TOML (`[providers]` section)
//!
//! ```toml
//! [providers]
//! default = "gateway"
//!
//! [providers.groq]
//! api_key_env = "MY_GROQ_KEY"
//!
//! [providers.routing]
//! "gemini-2.5-flash" = "openrouter"
//! ```

use crate::providers::{ProviderEndpoint, ProviderKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use traitor_domain::{ConfigIssue, ConfigIssueCode};

/// Connection settings for one provider
///
/// Unset fields fall back to the provider's built-in base URL and
/// environment variable name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderEndpoint {
    pub base_url: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, prefer the env var)
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Provider used when neither routing nor model family decides
    pub default: Option<String>,
    pub gateway: FileProviderEndpoint,
    pub openai: FileProviderEndpoint,
    pub groq: FileProviderEndpoint,
    pub openrouter: FileProviderEndpoint,
    pub google: FileProviderEndpoint,
    /// Explicit model to provider name mapping
    pub routing: HashMap<String, String>,
}

impl FileProvidersConfig {
    fn section(&self, kind: ProviderKind) -> &FileProviderEndpoint {
        match kind {
            ProviderKind::Gateway => &self.gateway,
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Groq => &self.groq,
            ProviderKind::OpenRouter => &self.openrouter,
            ProviderKind::Google => &self.google,
        }
    }

    /// Resolve the endpoint for `kind`, reading the key from the environment
    pub fn endpoint(&self, kind: ProviderKind) -> ProviderEndpoint {
        let section = self.section(kind);
        ProviderEndpoint::resolve(
            section
                .base_url
                .as_deref()
                .unwrap_or(kind.default_base_url()),
            section
                .api_key_env
                .as_deref()
                .unwrap_or(kind.default_api_key_env()),
            section.api_key.as_deref(),
        )
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Some(default) = &self.default
            && ProviderKind::parse(default).is_none()
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnknownProvider,
                format!("providers.default: unknown provider '{}'", default),
            ));
        }

        let mut routes: Vec<_> = self.routing.iter().collect();
        routes.sort();
        for (model, provider) in routes {
            if ProviderKind::parse(provider).is_none() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider,
                    format!(
                        "providers.routing: '{}' routes to unknown provider '{}', entry ignored",
                        model, provider
                    ),
                ));
            }
        }

        issues
    }
}
