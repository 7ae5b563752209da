use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use fintrack::accounting::ledger::Ledger;
use fintrack::data::{JsonStore, DEFAULT_LEDGER_FILE};
use fintrack::shell;

/// Track personal income and expenses from an interactive menu.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Ledger document to load and save
    #[arg(default_value = DEFAULT_LEDGER_FILE)]
    path: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    let mut ledger = Ledger::load(JsonStore::new(args.path));
    shell::run(&mut ledger, io::stdin().lock(), io::stdout().lock())?;

    Ok(())
}
