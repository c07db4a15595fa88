//! Statistics book: in-memory tally and history mirrored to a key-value store.

use std::path::Path;

use chrono::Utc;
use derive_getters::Getters;
use nova_tictactoe::GameStatus;
use tracing::{debug, info, instrument, warn};

use crate::stats::{GameRecord, SaveData, StatsError, Tally};
use crate::store::KeyValueStore;

/// Store key holding the serialized [`Tally`].
pub const STATS_KEY: &str = "tictactoe-stats";

/// Store key holding the serialized history list.
pub const HISTORY_KEY: &str = "tictactoe-history";

/// What an import changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct ImportSummary {
    stats_replaced: bool,
    history_records: Option<usize>,
}

/// Tally and history of finished games.
///
/// Every mutation is written to the store first and only then applied in
/// memory, so memory never holds a value the store rejected.
#[derive(Debug)]
pub struct StatsBook {
    store: Box<dyn KeyValueStore>,
    tally: Tally,
    history: Vec<GameRecord>,
}

impl StatsBook {
    /// Loads the tally and history from `store`.
    ///
    /// Missing keys start empty. Malformed stored values are logged and
    /// treated as missing.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Store`] if the store cannot be read.
    #[instrument(skip(store))]
    pub fn load(store: impl KeyValueStore + 'static) -> Result<Self, StatsError> {
        let tally = read_or_default::<Tally>(&store, STATS_KEY)?;
        let history = read_or_default::<Vec<GameRecord>>(&store, HISTORY_KEY)?;
        info!(
            x = tally.x,
            o = tally.o,
            draw = tally.draw,
            records = history.len(),
            "Statistics loaded"
        );
        Ok(Self {
            store: Box::new(store),
            tally,
            history,
        })
    }

    /// Current tally.
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// All history records, oldest first.
    pub fn history(&self) -> &[GameRecord] {
        &self.history
    }

    /// The last `limit` records, newest first, paired with their 1-based
    /// ordinal in the full history.
    pub fn recent(&self, limit: usize) -> Vec<(usize, &GameRecord)> {
        self.history
            .iter()
            .enumerate()
            .rev()
            .take(limit)
            .map(|(idx, record)| (idx + 1, record))
            .collect()
    }

    /// Records a finished game.
    ///
    /// A win bumps the winner's counter and appends a history record; a draw
    /// only bumps the draw counter. In-progress statuses are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Store`] if persisting fails.
    #[instrument(skip(self))]
    pub fn record(
        &mut self,
        status: GameStatus,
        move_count: usize,
    ) -> Result<Option<GameRecord>, StatsError> {
        if !status.is_terminal() {
            warn!("Ignoring unfinished game");
            return Ok(None);
        }

        let mut tally = self.tally;
        tally.count(status);
        let record = status
            .winner()
            .map(|winner| GameRecord::new(winner, move_count as u32, Utc::now()));

        if let Some(record) = &record {
            let mut history = self.history.clone();
            history.push(record.clone());
            self.persist(HISTORY_KEY, &history)?;
            self.history = history;
        }
        self.persist(STATS_KEY, &tally)?;
        self.tally = tally;

        info!(status = %status, move_count, total = self.tally.total(), "Game recorded");
        Ok(record)
    }

    /// Zeroes the tally and clears the history.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Store`] if persisting fails.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), StatsError> {
        let tally = Tally::default();
        self.persist(STATS_KEY, &tally)?;
        self.tally = tally;
        self.store.remove(HISTORY_KEY)?;
        self.history.clear();
        info!("Statistics and history reset");
        Ok(())
    }

    /// Serializes the tally and history as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Malformed`] if serialization fails.
    #[instrument(skip(self))]
    pub fn export_json(&self) -> Result<String, StatsError> {
        let data = SaveData {
            stats: Some(self.tally),
            game_history: Some(self.history.clone()),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Replaces the tally and/or history with the contents of `text`.
    ///
    /// Absent fields keep their current value. On any error the in-memory
    /// state is left untouched.
    ///
    /// # Errors
    ///
    /// - [`StatsError::Malformed`] if `text` is not a save document.
    /// - [`StatsError::Store`] if persisting fails.
    #[instrument(skip(self, text), fields(bytes = text.len()))]
    pub fn import_json(&mut self, text: &str) -> Result<ImportSummary, StatsError> {
        let data: SaveData = serde_json::from_str(text).inspect_err(|e| {
            warn!(error = %e, "Rejected malformed save data");
        })?;

        let summary = ImportSummary {
            stats_replaced: data.stats.is_some(),
            history_records: data.game_history.as_ref().map(Vec::len),
        };

        let tally = data.stats.unwrap_or(self.tally);
        let history = data.game_history.unwrap_or_else(|| self.history.clone());

        self.persist(STATS_KEY, &tally)?;
        self.persist(HISTORY_KEY, &history)?;
        self.tally = tally;
        self.history = history;

        info!(?summary, "Save data imported");
        Ok(summary)
    }

    /// Writes [`export_json`](Self::export_json) output to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Io`] if the file cannot be written.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<(), StatsError> {
        let json = self.export_json()?;
        std::fs::write(path.as_ref(), json)?;
        info!("Save file written");
        Ok(())
    }

    /// Reads `path` and passes it to [`import_json`](Self::import_json).
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Io`] if the file cannot be read, otherwise as
    /// [`import_json`](Self::import_json).
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_from(&mut self, path: impl AsRef<Path>) -> Result<ImportSummary, StatsError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.import_json(&text)
    }

    fn persist<T: serde::Serialize>(&mut self, key: &str, value: &T) -> Result<(), StatsError> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)?;
        Ok(())
    }
}

fn read_or_default<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, StatsError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let Some(raw) = store.get(key)? else {
        debug!(key, "No stored value");
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key, error = %e, "Stored value is malformed, starting fresh");
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use nova_tictactoe::Player;

    fn book() -> StatsBook {
        StatsBook::load(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_draw_is_counted_but_not_listed() {
        let mut book = book();
        let record = book.record(GameStatus::Draw, 9).unwrap();
        assert!(record.is_none());
        assert_eq!(book.tally().draw, 1);
        assert!(book.history().is_empty());
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut book = book();
        book.record(GameStatus::Won(Player::X), 5).unwrap();
        book.record(GameStatus::Won(Player::O), 6).unwrap();
        book.record(GameStatus::Won(Player::X), 7).unwrap();

        let recent = book.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].0, 3);
        assert_eq!(*recent[0].1.move_count(), 7);
        assert_eq!(recent[1].0, 2);
        assert_eq!(*recent[1].1.winner(), Player::O);
    }

    #[test]
    fn test_in_progress_is_ignored() {
        let mut book = book();
        assert!(book.record(GameStatus::InProgress, 3).unwrap().is_none());
        assert_eq!(book.tally().total(), 0);
    }
}
