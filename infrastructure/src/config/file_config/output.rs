//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};
use traitor_domain::OutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Result format; the CLI flag wins when given
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Show the live spinner and chat lines while the session runs
    pub show_progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            show_progress: true,
        }
    }
}
