//! Raw TOML configuration data types
//!
//! These structs mirror the structure of the TOML config file. They are
//! deserialized directly and converted into application types on demand.

mod game;
mod output;
mod providers;
mod session;

pub use game::FileGameConfig;
pub use output::FileOutputConfig;
pub use providers::{FileProviderEndpoint, FileProvidersConfig};
pub use session::FileSessionConfig;

use serde::{Deserialize, Serialize};
use traitor_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Topic and model lineup
    pub session: FileSessionConfig,
    /// Pacing, retries and sampling
    pub game: FileGameConfig,
    /// Result rendering
    pub output: FileOutputConfig,
    /// Provider endpoints and model routing
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors abort startup; warnings are logged and the session proceeds.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.session.validate());
        issues.extend(self.game.validate());
        issues.extend(self.providers.validate());
        issues
    }
}
