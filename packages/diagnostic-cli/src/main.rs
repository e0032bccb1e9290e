use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod context;
mod deliver;
mod interactive;
mod replay;

use config::Config;
use context::{AppContext, Tone};

/// Initial diagnostic questionnaire
#[derive(Parser, Debug)]
#[command(name = "diagnostico", version, about)]
struct Cli {
    /// Feed a JSON array of wizard events instead of prompting
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Write the submitted payload to this file
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only print errors and the payload
    #[arg(long, short)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let ctx = AppContext::new(cli.quiet, config);

    let payload = match &cli.replay {
        Some(path) => run_replay(&ctx, path)?,
        None => {
            print_banner(&ctx);
            match interactive::run(&ctx)? {
                Some(payload) => payload,
                None => {
                    ctx.status(Tone::Info, "Nothing submitted.");
                    return Ok(());
                }
            }
        }
    };

    deliver::deliver(&ctx, &payload, cli.output.as_deref()).await
}

fn run_replay(ctx: &AppContext, path: &Path) -> Result<diagnostic::SubmissionPayload> {
    let events = replay::load_events(path)?;
    tracing::info!(events = events.len(), path = %path.display(), "Replaying wizard events");

    let outcome = replay::run(&events);
    if let Some(payload) = outcome.payload {
        ctx.status(Tone::Success, &format!("✓ Replayed {} events, diagnostic submitted", events.len()));
        return Ok(payload);
    }

    for (field, message) in outcome.errors.iter() {
        ctx.status(Tone::Error, &format!("  {} ({}): {}", field.label(), field.key(), message));
    }
    bail!(
        "Replay ended on {:?} with {} unresolved error(s)",
        outcome.state,
        outcome.errors.len()
    )
}

fn print_banner(ctx: &AppContext) {
    if ctx.quiet {
        return;
    }
    eprintln!("{}", "╔════════════════════════════════════════╗".bright_cyan());
    eprintln!("{}", "║        Initial Diagnostic Wizard       ║".bright_cyan());
    eprintln!("{}", "╚════════════════════════════════════════╝".bright_cyan());
    if ctx.config.submit_url.is_none() {
        ctx.status(Tone::Info, "No DIAGNOSTIC_SUBMIT_URL set; the payload will be printed.");
    }
}
