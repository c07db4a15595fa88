//! Heuristic AI opponent.
//!
//! The AI looks exactly one ply ahead: take an immediate win, otherwise
//! block the opponent's immediate win, otherwise prefer the center, then a
//! random free corner, then the first empty square. Lower difficulties mix
//! in uniformly random moves.

use crate::rules::win::has_line;
use crate::{Board, Player, Position, Square};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How strongly the AI plays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Always a uniformly random empty square.
    Easy,
    /// The heuristic half of the time, otherwise random.
    Medium,
    /// Always the heuristic.
    #[default]
    Hard,
}

impl Difficulty {
    /// Display label for menus.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Cycles easy -> medium -> hard -> easy.
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

/// Picks a move for `mark` at the given difficulty.
///
/// Returns `None` only when the board has no empty square.
#[instrument(skip(board, rng), fields(board = %board.display().replace('\n', " ")))]
pub fn choose_ai_move<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    mark: Player,
    rng: &mut R,
) -> Option<Position> {
    let use_heuristic = match difficulty {
        Difficulty::Hard => true,
        Difficulty::Medium => rng.gen_bool(0.5),
        Difficulty::Easy => false,
    };

    let choice = if use_heuristic {
        best_move(board, mark, rng)
    } else {
        random_move(board, rng)
    };
    debug!(?choice, use_heuristic, "AI move chosen");
    choice
}

/// The one-ply heuristic: win, block, center, random corner, first empty.
pub fn best_move<R: Rng + ?Sized>(board: &Board, mark: Player, rng: &mut R) -> Option<Position> {
    if let Some(pos) = completing_move(board, mark) {
        return Some(pos);
    }
    if let Some(pos) = completing_move(board, mark.opponent()) {
        return Some(pos);
    }
    if board.is_empty(Position::Center) {
        return Some(Position::Center);
    }

    let corners: Vec<Position> = Position::CORNERS
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    if let Some(corner) = corners.choose(rng) {
        return Some(*corner);
    }

    board.empty_positions().first().copied()
}

/// A uniformly random empty square.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    board.empty_positions().choose(rng).copied()
}

/// First empty square (in index order) that gives `player` three in a row.
pub fn completing_move(board: &Board, player: Player) -> Option<Position> {
    board.empty_positions().into_iter().find(|pos| {
        let mut probe = *board;
        probe.set(*pos, Square::Occupied(player));
        has_line(&probe, player)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_hard_takes_win() {
        let board: Board = "XX.......".parse().unwrap();
        let pick = choose_ai_move(&board, Difficulty::Hard, Player::X, &mut rng());
        assert_eq!(pick, Some(Position::TopRight));
    }

    #[test]
    fn test_win_preferred_over_block() {
        // O can win on the middle row; X threatens the top row.
        let board: Board = "XX.OO.X..".parse().unwrap();
        let pick = best_move(&board, Player::O, &mut rng());
        assert_eq!(pick, Some(Position::MiddleRight));
    }

    #[test]
    fn test_hard_blocks() {
        let board: Board = "XX..O....".parse().unwrap();
        let pick = choose_ai_move(&board, Difficulty::Hard, Player::O, &mut rng());
        assert_eq!(pick, Some(Position::TopRight));
    }

    #[test]
    fn test_center_then_corner() {
        let board: Board = "X........".parse().unwrap();
        assert_eq!(best_move(&board, Player::O, &mut rng()), Some(Position::Center));

        let board: Board = "....X....".parse().unwrap();
        let pick = best_move(&board, Player::O, &mut rng()).unwrap();
        assert!(Position::CORNERS.contains(&pick));
    }

    #[test]
    fn test_completing_move() {
        // O holds 1, 4, 6; X holds 0, 2, 7, 8.
        let board: Board = "XOX.O.OXX".parse().unwrap();
        assert_eq!(completing_move(&board, Player::O), None);
        assert_eq!(completing_move(&board, Player::X), Some(Position::MiddleRight));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board: Board = "XOXXOXOXO".parse().unwrap();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(choose_ai_move(&board, difficulty, Player::O, &mut rng()), None);
        }
    }

    #[test]
    fn test_difficulty_parse_and_cycle() {
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("Medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    }
}
