//! Moves and the reasons a move can be refused.

use crate::{Player, Position};
use serde::{Deserialize, Serialize};

/// One mark placed on the board; the unit of [`Game`](crate::Game) history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Who placed the mark.
    pub player: Player,
    /// Where it went.
    pub position: Position,
}

impl Move {
    /// Pairs a mark with a cell.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on cell {}", self.player, self.position.to_index() + 1)
    }
}

/// Why the engine refused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Index outside 0-8.
    #[display("No cell at index {} (expected 0-8)", _0)]
    OutOfBounds(usize),

    /// Cell already holds a mark.
    #[display("Cell {} is taken", _0)]
    SquareOccupied(Position),

    /// Board is already won or drawn.
    #[display("The game has finished")]
    GameOver,

    /// Mark placed out of turn.
    #[display("{} is not to move", _0)]
    WrongPlayer(Player),
}

impl std::error::Error for MoveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_names_one_based_cell() {
        let action = Move::new(Player::O, Position::Center);
        assert_eq!(action.to_string(), "O on cell 5");
    }

    #[test]
    fn test_out_of_bounds_message() {
        assert_eq!(
            MoveError::OutOfBounds(9).to_string(),
            "No cell at index 9 (expected 0-8)"
        );
    }
}
