//! Move application and the stateful game engine.

use crate::action::{Move, MoveError};
use crate::rules::check_terminal;
use crate::{Board, GameStatus, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Places `player`'s mark at `index`, returning the resulting board.
///
/// The input board is left untouched.
///
/// # Errors
///
/// - [`MoveError::OutOfBounds`] if `index` is not 0-8.
/// - [`MoveError::GameOver`] if the board is already won or drawn.
/// - [`MoveError::SquareOccupied`] if the cell is taken.
#[instrument(skip(board))]
pub fn apply_move(board: &Board, index: usize, player: Player) -> Result<Board, MoveError> {
    let pos = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
    if check_terminal(board).is_terminal() {
        return Err(MoveError::GameOver);
    }
    if !board.is_empty(pos) {
        return Err(MoveError::SquareOccupied(pos));
    }

    let mut next = *board;
    next.set(pos, Square::Occupied(player));
    Ok(next)
}

/// Tic-tac-toe game: board, turn order, status and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Player,
    status: GameStatus,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new game with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    ///
    /// Once the game is over this is the player who made the final move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True while moves can still be made.
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of marks placed so far.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Makes a move for the player to move at the given index (0-8).
    ///
    /// # Errors
    ///
    /// See [`apply_move`].
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn make_move(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        self.play(Move::new(
            self.to_move,
            Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?,
        ))
    }

    /// Applies an explicit move, checking that it is that player's turn.
    ///
    /// # Errors
    ///
    /// [`MoveError::WrongPlayer`] if `action.player` is not to move, plus
    /// everything [`apply_move`] rejects.
    #[instrument(skip(self), fields(player = %action.player, position = %action.position))]
    pub fn play(&mut self, action: Move) -> Result<GameStatus, MoveError> {
        if !self.is_active() {
            return Err(MoveError::GameOver);
        }
        if action.player != self.to_move {
            return Err(MoveError::WrongPlayer(action.player));
        }

        self.board = apply_move(&self.board, action.position.to_index(), action.player)?;
        self.history.push(action);
        self.status = check_terminal(&self.board);

        if self.is_active() {
            self.to_move = self.to_move.opponent();
        }
        debug!(status = %self.status, moves = self.history.len(), "Move applied");
        Ok(self.status)
    }

    /// Replays moves from an empty board.
    ///
    /// # Errors
    ///
    /// Returns the first [`MoveError`] encountered.
    pub fn replay(moves: &[Move]) -> Result<Self, MoveError> {
        let mut game = Self::new();
        for action in moves {
            game.play(*action)?;
        }
        Ok(game)
    }

    /// Clears the board and hands the first move back to X.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
