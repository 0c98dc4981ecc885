//! Structured configuration issues.
//!
//! Config validation never fails outright; it reports every problem it
//! finds, each tagged with a [`Severity`]. Callers abort on errors and log
//! warnings.
//!
//! # Examples
//!
//! ```
//! use traitor_domain::config::{ConfigIssue, ConfigIssueCode, Severity, has_errors};
//!
//! let issues = vec![ConfigIssue::warning(
//!     ConfigIssueCode::MissingApiKey,
//!     "OPENAI_API_KEY is not set",
//! )];
//! assert!(!has_errors(&issues));
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: a session cannot start with this configuration.
    Error,
    /// Non-fatal: the session runs but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `[providers].default` or a routing target names no known provider.
    UnknownProvider,
    /// `max_turns` is zero or unreasonably large.
    TurnCountOutOfRange,
    /// Thinking delay minimum exceeds the maximum.
    InvertedDelayRange,
    /// Fewer than the minimum or more than the maximum models configured.
    ParticipantCountOutOfRange,
    /// A zero request timeout would fail every call.
    ZeroTimeout,
    /// A provider is routed to but has no API key available.
    MissingApiKey,
    /// A configured model has no entry in the strength table.
    UnknownModelStrength,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

/// Whether any issue is fatal.
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}
