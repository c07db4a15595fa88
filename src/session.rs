//! Play session: one game plus the mode, difficulty and AI schedule around it.

use std::time::{Duration, Instant};

use derive_getters::Getters;
use derive_more::Display;
use nova_tictactoe::{Difficulty, Game, GameStatus, MoveError, Player, Position, choose_ai_move};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

/// The mark the AI plays in [`GameMode::VsAi`].
pub const AI_MARK: Player = Player::O;

/// Who sits across the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, strum::EnumIter)]
pub enum GameMode {
    /// Two humans share the keyboard.
    #[display("vs Friend")]
    Friend,
    /// The human plays X against the AI.
    #[display("vs AI")]
    VsAi,
}

/// Errors from session input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionError {
    /// The engine rejected the move.
    #[display("{}", _0)]
    Move(MoveError),
    /// Input arrived while the AI is to move.
    #[display("Wait for the AI to move")]
    NotYourTurn,
}

impl std::error::Error for SessionError {}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

/// A game that has just ended, reported once for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct FinishedGame {
    status: GameStatus,
    move_count: usize,
}

/// One running game and everything needed to drive it.
#[derive(Debug, Clone)]
pub struct PlaySession {
    game: Game,
    mode: GameMode,
    difficulty: Difficulty,
    ai_delay: Duration,
    ai_due: Option<Instant>,
    reported: bool,
}

impl PlaySession {
    /// Creates a session with a fresh board.
    #[instrument]
    pub fn new(mode: GameMode, difficulty: Difficulty, ai_delay: Duration) -> Self {
        info!(%mode, %difficulty, "Starting play session");
        Self {
            game: Game::new(),
            mode,
            difficulty,
            ai_delay,
            ai_due: None,
            reported: false,
        }
    }

    /// Returns the game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the AI difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Changes the AI difficulty; applies from the next AI move.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// True while an AI move is scheduled.
    pub fn ai_pending(&self) -> bool {
        self.ai_due.is_some()
    }

    /// True if the player to move is controlled by the keyboard.
    pub fn awaiting_human(&self) -> bool {
        self.game.is_active()
            && !(self.mode == GameMode::VsAi && self.game.to_move() == AI_MARK)
    }

    /// Places the human's mark at `pos`.
    ///
    /// In [`GameMode::VsAi`] a successful move that leaves the game running
    /// schedules the AI reply at `now + ai_delay`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotYourTurn`] while the AI is to move.
    /// - [`SessionError::Move`] if the engine rejects the move.
    #[instrument(skip(self, now), fields(mode = %self.mode, player = %self.game.to_move()))]
    pub fn human_move(&mut self, pos: Position, now: Instant) -> Result<GameStatus, SessionError> {
        if self.game.is_active() && !self.awaiting_human() {
            debug!("Ignoring input during AI turn");
            return Err(SessionError::NotYourTurn);
        }

        let status = self.game.make_move(pos.to_index()).inspect_err(|e| {
            debug!(error = %e, "Move rejected");
        })?;

        if self.mode == GameMode::VsAi && self.game.is_active() {
            self.ai_due = Some(now + self.ai_delay);
            debug!(delay_ms = self.ai_delay.as_millis() as u64, "AI move scheduled");
        }
        Ok(status)
    }

    /// Plays the scheduled AI move if it is due.
    ///
    /// Returns the chosen position, or `None` if nothing was due.
    #[instrument(skip(self, now, rng), fields(difficulty = %self.difficulty))]
    pub fn poll_ai<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> Option<Position> {
        let due = self.ai_due?;
        if now < due {
            return None;
        }
        self.ai_due = None;

        if !self.game.is_active() {
            return None;
        }

        let pos = choose_ai_move(self.game.board(), self.difficulty, AI_MARK, rng)?;
        match self.game.make_move(pos.to_index()) {
            Ok(status) => {
                info!(position = %pos, %status, "AI moved");
                Some(pos)
            }
            Err(e) => {
                warn!(error = %e, position = %pos, "AI chose an illegal move");
                None
            }
        }
    }

    /// Yields the finished game exactly once.
    pub fn take_finished(&mut self) -> Option<FinishedGame> {
        if self.reported || self.game.is_active() {
            return None;
        }
        self.reported = true;
        Some(FinishedGame {
            status: self.game.status(),
            move_count: self.game.move_count(),
        })
    }

    /// Starts a new game with the same mode and difficulty.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.game.reset();
        self.ai_due = None;
        self.reported = false;
        info!("Board reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ai_not_due_before_delay() {
        let start = Instant::now();
        let mut session =
            PlaySession::new(GameMode::VsAi, Difficulty::Hard, Duration::from_millis(800));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        session.human_move(Position::TopLeft, start).unwrap();
        assert!(session.ai_pending());
        assert_eq!(session.poll_ai(start + Duration::from_millis(799), &mut rng), None);
        assert_eq!(
            session.poll_ai(start + Duration::from_millis(800), &mut rng),
            Some(Position::Center)
        );
        assert!(!session.ai_pending());
    }

    #[test]
    fn test_friend_mode_never_schedules_ai() {
        let now = Instant::now();
        let mut session = PlaySession::new(GameMode::Friend, Difficulty::Hard, Duration::ZERO);
        session.human_move(Position::Center, now).unwrap();
        assert!(!session.ai_pending());
        assert_eq!(session.game().to_move(), Player::O);
        session.human_move(Position::TopLeft, now).unwrap();
        assert_eq!(session.game().move_count(), 2);
    }
}
