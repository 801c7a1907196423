//! Battle simulator binary.
//!
//! Loads content from a data directory, runs one battle to completion and
//! prints the event stream as JSON on stdout. Logs go to stderr and honour
//! `RUST_LOG`.
//!
//! ```bash
//! cargo run -p battle-runtime --bin battle-sim -- --battle skirmish --seed demo
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use battle_core::GameError;
use battle_runtime::{BattleSimulation, RuntimeError};
use clap::Parser;

/// Run a battle and print its events
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Deterministic tactical battle simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory holding config.toml, tables and battles/
    #[arg(short, long, value_name = "DIR", default_value = "crates/game/content/data")]
    data_dir: PathBuf,

    /// Battle setup to load from battles/{NAME}.ron
    #[arg(short, long, value_name = "NAME", default_value = "skirmish")]
    battle: String,

    /// Seed string; overrides the setup's seed
    #[arg(short, long, value_name = "SEED")]
    seed: Option<String>,

    /// Fight at night regardless of the setup
    #[arg(long)]
    night: bool,

    /// Pretty-print the event array
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let factory = ContentFactory::new(cli.data_dir.clone());
    let config = factory.load_config()?;
    let tables = factory.load_tables()?;
    let mut setup = factory
        .load_battle(&cli.battle)
        .with_context(|| format!("loading battle '{}'", cli.battle))?;
    if cli.night {
        setup.is_night = true;
    }

    let mut simulation = BattleSimulation::from_setup(tables, config, &setup, cli.seed.as_deref())
        .inspect_err(report)?;
    let outcome = simulation.run_to_completion().inspect_err(report)?;
    tracing::info!(?outcome, events = simulation.events().len(), "simulation complete");

    let events = simulation.into_events();
    let json = if cli.pretty {
        serde_json::to_string_pretty(&events)?
    } else {
        serde_json::to_string(&events)?
    };
    println!("{json}");

    Ok(())
}

fn report(err: &RuntimeError) {
    tracing::error!(
        code = err.error_code(),
        severity = err.severity().as_str(),
        recoverable = err.is_recoverable(),
        "{err}"
    );
}
