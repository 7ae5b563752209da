// Shared by several test binaries, each of which uses only part of it.
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use fintrack::accounting::ledger::Ledger;
use fintrack::data::JsonStore;
use fintrack::shell;
use tempfile::TempDir;

/// A fresh ledger file path inside its own temporary directory.
pub fn temp_ledger_path() -> Result<(PathBuf, TempDir)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("transactions.json");
    Ok((path, dir))
}

/// Feeds `script` to the menu and returns everything it printed.
pub fn run_script(ledger: &mut Ledger, script: &str) -> Result<String> {
    let mut output = Vec::new();
    shell::run(ledger, script.as_bytes(), &mut output)?;
    Ok(String::from_utf8(output)?)
}

pub fn load(path: &PathBuf) -> Ledger {
    Ledger::load(JsonStore::new(path))
}
