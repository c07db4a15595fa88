//! NovaCore tic-tac-toe: play sessions, persisted statistics and a terminal UI.
//!
//! # Architecture
//!
//! - **Engine**: [`nova_tictactoe`] holds the pure board rules and the AI.
//! - **Session**: [`PlaySession`] owns one running game, its mode and the
//!   scheduled AI reply.
//! - **Statistics**: [`StatsBook`] keeps the tally and win history, written
//!   through to a [`KeyValueStore`] ([`SqliteStore`] on disk,
//!   [`MemoryStore`] in tests).
//! - **UI**: [`tui`] drives menu, game, settings and history screens from a
//!   key-to-action table.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use nova_core::{GameMode, MemoryStore, PlaySession, StatsBook};
//! use nova_core::nova_tictactoe::{Difficulty, Position};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut book = StatsBook::load(MemoryStore::new())?;
//! let mut session = PlaySession::new(GameMode::Friend, Difficulty::Hard, Duration::ZERO);
//! let now = Instant::now();
//! for pos in [Position::TopLeft, Position::Center, Position::TopCenter,
//!             Position::BottomLeft, Position::TopRight] {
//!     session.human_move(pos, now)?;
//! }
//! if let Some(done) = session.take_finished() {
//!     book.record(*done.status(), *done.move_count())?;
//! }
//! assert_eq!(book.tally().x, 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod session;
mod stats;
mod store;
pub mod tui;

pub use nova_tictactoe;

// Crate-level exports - Configuration
pub use config::{
    AppConfig, ConfigError, DEFAULT_CONFIG_FILE, ENV_AI_DELAY_MS, ENV_AI_LEVEL, ENV_DB_PATH,
};

// Crate-level exports - Play session
pub use session::{AI_MARK, FinishedGame, GameMode, PlaySession, SessionError};

// Crate-level exports - Statistics
pub use stats::{
    GameRecord, HISTORY_KEY, ImportSummary, STATS_KEY, SaveData, StatsBook, StatsError, Tally,
};

// Crate-level exports - Storage
pub use store::{KeyValueStore, KvEntry, MemoryStore, SqliteStore, StoreError, StoreOp};

// Crate-level exports - TUI
pub use tui::{Controller, run_tui};
