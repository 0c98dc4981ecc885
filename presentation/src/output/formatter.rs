//! Output formatter trait

use traitor_domain::{OutputFormat, SessionResult};

/// Trait for formatting session results
pub trait OutputFormatter {
    /// Lineup, transcript, ballots and scoreboard
    fn format_full(&self, result: &SessionResult) -> String;

    /// Verdict, reveal and scoreboard
    fn format_summary(&self, result: &SessionResult) -> String;

    fn format_json(&self, result: &SessionResult) -> String;

    /// Dispatch on the configured format
    fn render(&self, result: &SessionResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format_full(result),
            OutputFormat::Summary => self.format_summary(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
