//! Win/draw tallies and game history.

mod book;
mod error;
mod models;

pub use book::{HISTORY_KEY, ImportSummary, STATS_KEY, StatsBook};
pub use error::StatsError;
pub use models::{GameRecord, SaveData, Tally};
