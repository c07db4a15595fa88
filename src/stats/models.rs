//! Serialized statistics records.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use nova_tictactoe::{GameStatus, Player};
use serde::{Deserialize, Serialize};

/// Win/draw counters.
///
/// Missing counters deserialize as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tally {
    /// Games won by X.
    pub x: u32,
    /// Games won by O.
    pub o: u32,
    /// Drawn games.
    pub draw: u32,
}

impl Tally {
    /// Total finished games.
    ///
    /// Widened so imported counters at `u32::MAX` still sum.
    pub fn total(&self) -> u64 {
        u64::from(self.x) + u64::from(self.o) + u64::from(self.draw)
    }

    /// Wins for `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Counts a finished game, saturating at `u32::MAX`. In-progress
    /// statuses are ignored.
    pub fn count(&mut self, status: GameStatus) {
        let counter = match status {
            GameStatus::Won(Player::X) => &mut self.x,
            GameStatus::Won(Player::O) => &mut self.o,
            GameStatus::Draw => &mut self.draw,
            GameStatus::InProgress => return,
        };
        *counter = counter.saturating_add(1);
    }
}

/// One won game in the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    winner: Player,
    #[serde(alias = "moves")]
    move_count: u32,
    timestamp: DateTime<Utc>,
}

/// Exported save document: `{"stats": {...}, "gameHistory": [...]}`.
///
/// Either field may be absent on import.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    /// Tally, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Tally>,
    /// History records, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_history: Option<Vec<GameRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_count() {
        let mut tally = Tally::default();
        tally.count(GameStatus::Won(Player::X));
        tally.count(GameStatus::Won(Player::X));
        tally.count(GameStatus::Won(Player::O));
        tally.count(GameStatus::Draw);
        tally.count(GameStatus::InProgress);
        assert_eq!(tally, Tally { x: 2, o: 1, draw: 1 });
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.wins(Player::X), 2);
    }

    #[test]
    fn test_tally_saturates_at_max() {
        let mut tally = Tally {
            x: u32::MAX,
            o: u32::MAX,
            draw: u32::MAX,
        };
        tally.count(GameStatus::Won(Player::X));
        tally.count(GameStatus::Draw);
        assert_eq!(tally.x, u32::MAX);
        assert_eq!(tally.draw, u32::MAX);
        assert_eq!(tally.total(), 3 * u64::from(u32::MAX));
    }

    #[test]
    fn test_tally_missing_fields_default_to_zero() {
        let tally: Tally = serde_json::from_str(r#"{"x": 3}"#).unwrap();
        assert_eq!(tally, Tally { x: 3, o: 0, draw: 0 });
    }

    #[test]
    fn test_record_field_names() {
        let record = GameRecord::new(
            Player::O,
            7,
            "2026-10-19T12:00:00Z".parse().unwrap(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["winner"], "O");
        assert_eq!(json["moveCount"], 7);
        assert_eq!(json["timestamp"], "2026-10-19T12:00:00Z");

        let legacy: GameRecord = serde_json::from_str(
            r#"{"winner": "X", "moves": 5, "timestamp": "2026-10-19T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(*legacy.move_count(), 5);
    }
}
