//! Flashcards CLI - study term/definition pairs in the terminal.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use flashcards::Session;
use log::info;
use std::fs;
use std::io;
use std::path::PathBuf;

mod cli;

use cli::Cli;

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flashcards")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("flashcards.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.session_config();
    info!("Session config: {:?}", config);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    let mut session = Session::new(config, stdin, stdout);
    session.run().context("Session aborted")?;

    info!("Session ended with {} cards", session.store().len());
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
