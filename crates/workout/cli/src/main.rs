//! Workout - terminal host for workout sessions
//!
//! Loads a plan from configuration, then reads commands from stdin and
//! prints a status line on every command and every display tick.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_engine::{SessionDriver, WorkoutSession};
use workout_types::WorkoutPlan;

mod command;
mod config;
mod error;
mod render;
mod shell;

use crate::command::Command;
use crate::config::{LoggingConfig, WorkoutConfig};
use crate::error::CliResult;
use crate::shell::{Flow, Shell};

/// Workout CLI
#[derive(Parser)]
#[command(name = "workout")]
#[command(about = "Run a timed workout session from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "WORKOUT_CONFIG")]
    config: Option<String>,

    /// Log level
    #[arg(long, env = "WORKOUT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "WORKOUT_LOG_JSON")]
    json: bool,
}

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.clone().into());

    // Logs go to stderr so status lines on stdout stay clean
    if logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let mut config = WorkoutConfig::load(cli.config.as_deref())?;

    // Override with CLI args
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.json = true;
    }
    init_tracing(&config.logging);

    // A configured plan that does not compose is kept as a draft for `set`
    let (session, draft) = match WorkoutSession::new(config.plan.clone()) {
        Ok(session) => (session, None),
        Err(e) if e.is_validation() => {
            tracing::warn!(error = %e, "Configured plan rejected");
            eprintln!("error: configured plan rejected: {}", e);
            (WorkoutSession::new(WorkoutPlan::recommended())?, Some(config.plan.clone()))
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(session = %session.id().short(), ready = draft.is_none(), "Session loaded");
    let (driver, mut ticks) = SessionDriver::new(session, config.ticks.clone())?;
    let mut shell = match draft {
        Some(draft) => Shell::with_draft(driver, draft, std::io::stdout()),
        None => Shell::new(driver, std::io::stdout()),
    };

    println!("workout {} (type 'help' for commands)", env!("CARGO_PKG_VERSION"));
    shell.execute(Command::Plan)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match shell.handle_line(&line) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(e) => {
                        tracing::debug!(error = %e, "Command failed");
                        eprintln!("error: {}", e);
                    }
                }
            }
            Some(tick) = ticks.recv() => shell.on_tick(tick)?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    shell.finish()
}
