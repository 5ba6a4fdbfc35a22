//! Lockon - target lock-on demo
//!
//! Runs a scripted arena session against the lock-on engine and prints a JSON
//! summary of every lock, switch and release.

mod arena;
mod demo;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use demo::{default_script, Demo};
use settings::GameSettings;

/// Scripted target lock-on demo
#[derive(Debug, Parser)]
#[command(name = "lockon")]
#[command(about = "Run the scripted lock-on arena and print a JSON summary", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to <config dir>/lockon/settings.toml)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    info!("Starting Lockon demo...");

    let settings = GameSettings::load(cli.settings.as_deref());
    settings
        .targeting
        .validate()
        .context("Invalid targeting settings")?;

    if cli.save_settings {
        settings.save(cli.settings.as_deref())?;
    }

    let summary = Demo::new(&settings).run(&default_script(&settings.arena));
    info!(
        "Finished after {} frames: {} locks, {} switches, {} releases",
        summary.frames, summary.locks, summary.switches, summary.releases
    );

    let report = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    println!("{}", report);

    Ok(())
}
