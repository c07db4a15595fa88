//! Command-line interface for nova_core.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nova_tictactoe::Difficulty;

/// NovaCore - terminal tic-tac-toe with an AI opponent
#[derive(Parser, Debug)]
#[command(name = "nova_core")]
#[command(about = "Tic-tac-toe against a friend or the AI, with saved statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults to nova_core.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the statistics database, overriding config and environment
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the terminal UI
    Play {
        /// AI level for games against the computer
        #[arg(long)]
        ai_level: Option<Difficulty>,
    },

    /// Print the win/draw tally
    Stats,

    /// Print the most recent wins, newest first
    History {
        /// Number of records to show (defaults to the configured history limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Write statistics and history to a JSON save file
    Export {
        /// Destination file
        file: PathBuf,
    },

    /// Replace statistics and history from a JSON save file
    Import {
        /// Source file
        file: PathBuf,
    },

    /// Clear statistics and history
    Reset,
}
