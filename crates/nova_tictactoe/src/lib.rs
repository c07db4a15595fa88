//! Pure tic-tac-toe game logic.
//!
//! - [`Board`], [`Player`], [`Square`], [`Position`]: the 3x3 board model.
//! - [`apply_move`] and [`check_terminal`]: pure state transitions.
//! - [`Game`]: turn order, status and history around a board.
//! - [`choose_ai_move`]: one-ply heuristic opponent with three difficulties.
//!
//! ```
//! use nova_tictactoe::{Board, Difficulty, Player, Position, choose_ai_move};
//! use rand::SeedableRng;
//!
//! let board: Board = "XX.......".parse().unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let pick = choose_ai_move(&board, Difficulty::Hard, Player::O, &mut rng);
//! assert_eq!(pick, Some(Position::TopRight));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod ai;
mod game;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use ai::{Difficulty, best_move, choose_ai_move, completing_move, random_move};
pub use game::{Game, apply_move};
pub use position::Position;
pub use rules::{check_terminal, check_winner, is_full, winning_line};
pub use types::{Board, BoardParseError, GameStatus, Player, Square};
