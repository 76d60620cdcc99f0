//! Screentimer - a borderless, always-on-top countdown/clock overlay.
//!
//! `screentimer [seconds] [flags]` shows a countdown (or the wall clock)
//! centered or corner-anchored on one or more displays, optionally
//! playing a sound or speaking text at the start, middle, or end.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use screentimer::cli::{self, Cli};
use screentimer::speech::{CommandSynthesizer, SpeechSynthesizer};
use screentimer::ui;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    // Help (explicit or implied by an empty command line) prints usage
    // plus the installed voices and exits without creating a window.
    if cli::wants_help(&args) {
        let synth: Arc<dyn SpeechSynthesizer> = Arc::new(CommandSynthesizer::detect());
        let voices = runtime.block_on(cli::enumerate_voices(synth));
        cli::print_help(&voices);
        return Ok(());
    }

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        cli::generate_completions(shell);
        return Ok(());
    }

    let config = Arc::new(cli.into_config());
    ui::run_overlay(config, runtime.handle().clone())?;

    // Fire-and-forget speech may still be in flight on a forced close;
    // leak it rather than hold the process open.
    runtime.shutdown_background();
    Ok(())
}
