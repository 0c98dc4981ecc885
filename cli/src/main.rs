//! CLI entrypoint for Turing Traitor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use traitor_application::{
    CompositeObserver, NoObserver, RunSessionInput, RunSessionUseCase, SessionObserver,
};
use traitor_domain::{ConfigIssue, Model, Severity};
use traitor_infrastructure::{ConfigLoader, JsonlSessionLogger, RoutingProvider};
use traitor_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
};

/// Conventional exit status for a run stopped by Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    report_issues(&config.validate())?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting Turing Traitor");

    let topic = cli
        .topic
        .clone()
        .or_else(|| config.session.topic.clone())
        .filter(|t| !t.trim().is_empty())
        .context("A topic is required: pass it as an argument or set session.topic in config")?;

    let models: Vec<Model> = if cli.model.is_empty() {
        config.session.models()
    } else {
        cli.model.iter().map(|m| Model::new(m.trim())).collect()
    };

    let mut params = config.game.to_session_params();
    if let Some(turns) = cli.turns {
        if turns == 0 {
            bail!("--turns must be at least 1");
        }
        params = params.with_max_turns(turns);
    }

    // === Dependency Injection ===
    let provider = Arc::new(RoutingProvider::from_config(&config.providers));
    for issue in provider.credential_issues(&models) {
        warn!("{}", issue.message);
    }

    let token = CancellationToken::new();
    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling session");
            interrupt.cancel();
        }
    });

    let use_case = RunSessionUseCase::new(provider).with_cancellation(token);
    let input = RunSessionInput::new(topic.clone(), models.clone()).with_params(params);

    let format = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    let show_progress = !cli.quiet && config.output.show_progress;
    if show_progress && format != traitor_domain::OutputFormat::Json {
        print_header(&topic, &models);
    }

    let progress: Box<dyn SessionObserver> = if !show_progress {
        Box::new(NoObserver)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };
    let session_log = cli.session_log.as_ref().and_then(JsonlSessionLogger::new);

    let mut observer = CompositeObserver::new(vec![progress.as_ref()]);
    if let Some(logger) = &session_log {
        info!("Writing session log to {}", logger.path().display());
        observer.push(logger);
    }

    let result = match use_case.execute_with_observer(input, &observer).await {
        Ok(result) => result,
        Err(e) if e.is_cancelled() => {
            drop(session_log);
            eprintln!("Session cancelled.");
            std::process::exit(EXIT_INTERRUPTED);
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", ConsoleFormatter.render(&result, format));

    Ok(())
}

/// Log warnings; fail on the first error-level issue.
fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        match issue.severity {
            Severity::Warning => warn!("Config: {}", issue.message),
            Severity::Error => bail!("Invalid configuration: {}", issue.message),
        }
    }
    Ok(())
}

fn print_header(topic: &str, models: &[Model]) {
    println!();
    println!("+============================================================+");
    println!("|           Turing Traitor - Find the Weak Model             |");
    println!("+============================================================+");
    println!();
    println!("Topic: {}", topic);
    println!(
        "Models: {}",
        models
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();
}
