//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for session results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Lineup, full transcript, ballots and scores
    Full,
    /// Verdict, reveal and scores only
    Summary,
    /// The result as JSON
    Json,
}

impl From<OutputFormat> for traitor_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => traitor_domain::OutputFormat::Full,
            OutputFormat::Summary => traitor_domain::OutputFormat::Summary,
            OutputFormat::Json => traitor_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for turing-traitor
#[derive(Parser, Debug)]
#[command(name = "turing-traitor")]
#[command(author, version, about = "Find the weak model hiding among its peers")]
#[command(long_about = r#"
Turing Traitor seats several language models in a group chat. The one running
the weakest model is secretly the Traitor and tries to blend in; everyone else
tries to spot it.

A session has two phases:
1. Discussion: models take turns talking about the topic, never twice in a row
2. Voting: every model names who it thinks the Traitor is, all at once

The most-accused participant is eliminated. The detectives win only if that
is the Traitor.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./traitor.toml      Project-level config
3. ~/.config/turing-traitor/config.toml   Global config

Example:
  turing-traitor "Is cereal a soup?"
  turing-traitor -m gpt-4o-mini -m gemini-2.5-flash -m groq/gemma-2-9b-it "Pineapple on pizza"
  turing-traitor --turns 6 --output full --session-log session.jsonl "Cats or dogs"
"#)]
pub struct Cli {
    /// Discussion topic (falls back to `session.topic` from config)
    pub topic: Option<String>,

    /// Models to seat, one per participant (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Number of discussion turns before voting
    #[arg(short, long, value_name = "N")]
    pub turns: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write every session event as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub session_log: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators and live chat lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
