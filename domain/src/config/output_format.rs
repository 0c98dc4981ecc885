//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished session is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Transcript, votes and scoreboard
    Full,
    /// Verdict and scoreboard only (default)
    #[default]
    Summary,
    /// The whole result as JSON
    Json,
}
