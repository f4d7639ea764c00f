//! coinop: arcade machine catalog and purchase shell.
//!
//! Registers buyers, lists the machine and game catalogs, walks a buyer
//! through customizing a cabinet, and records purchases. All state lives in
//! flat JSON stores under the data directory.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use coinop_cli::menu;
use coinop_cli::seed;
use coinop_cli::store::Stores;

#[derive(Parser)]
#[command(name = "coinop", about = "Arcade machine catalog and purchase shell")]
struct Cli {
    /// Directory holding the JSON stores (defaults to the platform data dir).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Write a starter catalog into empty machine/game stores first.
    #[arg(long)]
    seed: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let data_dir = cli
        .data_dir
        .or_else(|| dirs::data_dir().map(|d| d.join("coinop")))
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data dir {}", data_dir.display()))?;
    tracing::debug!("stores live in {}", data_dir.display());

    let stores = Stores::json(&data_dir);
    if cli.seed {
        seed::write_demo_catalog(&stores).context("seeding demo catalog")?;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    menu::run(&stores, &mut input, &mut out).context("menu session")?;
    Ok(())
}
