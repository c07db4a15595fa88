//! NovaCore - terminal tic-tac-toe CLI.

#![warn(missing_docs)]

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use nova_core::{AppConfig, SqliteStore, StatsBook, run_tui};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "nova_core.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play { ai_level: None });

    let tui = matches!(command, Command::Play { .. });
    init_tracing(tui)?;

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }

    let store = SqliteStore::open(config.db_path().to_string_lossy())?;
    let book = StatsBook::load(store)?;

    match command {
        Command::Play { ai_level } => {
            if let Some(level) = ai_level {
                config = config.with_difficulty(level);
            }
            run_tui(config, book).await
        }
        Command::Stats => print_stats(&book),
        Command::History { limit } => {
            print_history(&book, limit.unwrap_or(*config.history_limit()));
            Ok(())
        }
        Command::Export { file } => export(&book, &file),
        Command::Import { file } => import(book, &file),
        Command::Reset => reset(book),
    }
}

/// Logs to a file while the TUI owns the terminal, to stderr otherwise.
fn init_tracing(tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if tui {
        let log_file = std::fs::File::create(LOG_FILE)
            .with_context(|| format!("Failed to create {}", LOG_FILE))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Arc::new(log_file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn print_stats(book: &StatsBook) -> Result<()> {
    let tally = book.tally();
    println!("X wins: {}", tally.x);
    println!("O wins: {}", tally.o);
    println!("Draws:  {}", tally.draw);
    println!("Total:  {}", tally.total());
    Ok(())
}

fn print_history(book: &StatsBook, limit: usize) {
    let recent = book.recent(limit);
    if recent.is_empty() {
        println!("History is empty");
        return;
    }
    for (ordinal, record) in recent {
        println!(
            "#{}: {} won in {} moves ({})",
            ordinal,
            record.winner(),
            record.move_count(),
            record.timestamp().to_rfc3339()
        );
    }
}

#[instrument(skip(book))]
fn export(book: &StatsBook, file: &Path) -> Result<()> {
    book.export_to(file)
        .with_context(|| format!("Failed to export to {}", file.display()))?;
    info!("Export complete");
    println!("Saved statistics to {}", file.display());
    Ok(())
}

#[instrument(skip(book))]
fn import(mut book: StatsBook, file: &Path) -> Result<()> {
    let summary = book
        .import_from(file)
        .with_context(|| format!("Failed to import {}; statistics unchanged", file.display()))?;
    println!(
        "Imported {}: stats {}, history {}",
        file.display(),
        if *summary.stats_replaced() { "replaced" } else { "kept" },
        summary
            .history_records()
            .map(|n| format!("{} records", n))
            .unwrap_or_else(|| "kept".to_string())
    );
    Ok(())
}

fn reset(mut book: StatsBook) -> Result<()> {
    book.reset()?;
    println!("Statistics and history cleared");
    Ok(())
}
