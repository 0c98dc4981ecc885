//! Model value object representing a remote completion model

use serde::{Deserialize, Serialize};

/// Declared strength of well-known models (higher = stronger).
///
/// Identifiers missing from this table score 0 and are therefore always
/// among the weakest participants of a session.
const MODEL_STRENGTH: &[(&str, u32)] = &[
    ("claude-3.5-sonnet", 95),
    ("gpt-5-chat", 90),
    ("grok-4.1-fast-reasoning", 85),
    ("gpt-4o-mini", 80),
    ("gpt-5.1-instant", 75),
    ("gemini-2.5-flash", 75),
    ("gpt-5-mini", 75),
    ("gpt-4.1-mini", 75),
    ("gemini-2.0-flash", 70),
    ("gpt-oss-120b", 70),
    ("gemini-2.0-flash-lite", 65),
    ("gemini-2.5-flash-lite", 65),
    ("grok-4.1-fast-non-reasoning", 60),
    ("gemma-2-9b-it", 60),
    ("gpt-4.1-nano", 50),
    ("ministral-3b", 40),
];

/// A model identifier as understood by a completion provider (Value Object)
///
/// Identifiers are opaque strings such as `gpt-4o-mini` or provider-prefixed
/// routes such as `groq/gemma-2-9b-it`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier without any provider prefix (`groq/gemma-2-9b-it` -> `gemma-2-9b-it`)
    pub fn base_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// The provider prefix, if the identifier carries one
    pub fn provider_prefix(&self) -> Option<&str> {
        self.0.split_once('/').map(|(prefix, _)| prefix)
    }

    /// Declared strength score from the static table, 0 when unknown
    pub fn strength(&self) -> u32 {
        let lookup = |id: &str| {
            MODEL_STRENGTH
                .iter()
                .find(|(name, _)| *name == id)
                .map(|(_, score)| *score)
        };
        lookup(self.as_str())
            .or_else(|| lookup(self.base_name()))
            .unwrap_or(0)
    }

    /// Whether the model is listed in the strength table
    pub fn is_known(&self) -> bool {
        self.strength() > 0
    }

    /// Check if this is a Google-hosted model (Gemini / Gemma family)
    pub fn is_google(&self) -> bool {
        let base = self.base_name();
        base.starts_with("gemini") || base.starts_with("gemma")
    }

    /// Default lineup used when no models are configured
    pub fn default_models() -> Vec<Model> {
        vec![
            Model::new("gpt-4o-mini"),
            Model::new("gemini-2.5-flash"),
            Model::new("gpt-4.1-nano"),
        ]
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::new(s.trim()))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}
