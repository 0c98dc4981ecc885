//! Session lineup from TOML (`[session]` section)
//!
//! ```toml
//! [session]
//! topic = "Is cereal a soup?"
//! models = ["gpt-4o-mini", "gemini-2.5-flash", "gpt-4.1-nano"]
//! ```

use serde::{Deserialize, Serialize};
use traitor_domain::{ConfigIssue, ConfigIssueCode, MAX_PARTICIPANTS, MIN_PARTICIPANTS, Model};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Discussion topic, used when none is given on the command line
    pub topic: Option<String>,
    /// One model per participant slot
    pub models: Vec<String>,
}

impl FileSessionConfig {
    /// Configured lineup, or the built-in default when none is set
    pub fn models(&self) -> Vec<Model> {
        if self.models.is_empty() {
            Model::default_models()
        } else {
            self.models.iter().map(|m| Model::new(m.trim())).collect()
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let count = self.models.len();
        if count > 0 && !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&count) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ParticipantCountOutOfRange,
                format!(
                    "session.models lists {} models; a session needs {} to {}",
                    count, MIN_PARTICIPANTS, MAX_PARTICIPANTS
                ),
            ));
        }

        for model in self.models() {
            if !model.is_known() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownModelStrength,
                    format!(
                        "session.models: '{}' has no declared strength and counts as weakest",
                        model
                    ),
                ));
            }
        }

        issues
    }
}
