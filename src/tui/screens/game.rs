//! In-game screen: the board, whose turn it is, and the running score.

use std::time::Instant;

use nova_tictactoe::{GameStatus, Position};
use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument, warn};

use crate::tui::board::{move_cursor, render_board};
use crate::tui::keymap::Action;
use crate::tui::screen::{AppContext, Screen, ScreenKind, ScreenTransition};
use crate::tui::screens::{help_bar, tally_text, title_bar};
use crate::{AppConfig, GameMode, PlaySession, SessionError};

/// State for the in-game screen.
#[derive(Debug)]
pub struct GameScreen {
    session: PlaySession,
    cursor: Position,
    notice: Option<String>,
}

impl GameScreen {
    /// Starts a new game in `mode` using the configured AI level and delay.
    #[instrument(skip(config))]
    pub fn new(mode: GameMode, config: &AppConfig) -> Self {
        Self {
            session: PlaySession::new(mode, *config.difficulty(), config.ai_delay()),
            cursor: Position::Center,
            notice: None,
        }
    }

    /// The running session.
    pub fn session(&self) -> &PlaySession {
        &self.session
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Advances timed work: plays a due AI move and records a finished game.
    #[instrument(skip(self, rng, ctx))]
    pub fn tick<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R, ctx: &mut AppContext) {
        if let Some(pos) = self.session.poll_ai(now, rng) {
            debug!(position = %pos, "AI move displayed");
        }

        if let Some(finished) = self.session.take_finished() {
            match ctx.book.record(*finished.status(), *finished.move_count()) {
                Ok(_) => info!(status = %finished.status(), "Result saved"),
                Err(e) => {
                    warn!(error = %e, "Failed to save result");
                    self.notice = Some(format!("Could not save result: {}", e));
                }
            }
        }
    }

    fn play(&mut self, pos: Position) {
        self.cursor = pos;
        match self.session.human_move(pos, Instant::now()) {
            Ok(_) => self.notice = None,
            Err(SessionError::NotYourTurn) => {}
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn status_text(&self) -> String {
        if let Some(notice) = &self.notice {
            return notice.clone();
        }
        let game = self.session.game();
        match game.status() {
            GameStatus::Won(player) => format!("Player {} wins!", player),
            GameStatus::Draw => "Draw!".to_string(),
            GameStatus::InProgress if self.session.ai_pending() => "AI is thinking…".to_string(),
            GameStatus::InProgress => format!("Turn: {}", game.to_move()),
        }
    }
}

impl Screen for GameScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Game
    }

    fn render(&self, frame: &mut Frame, ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(7),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = match self.session.mode() {
            GameMode::Friend => format!("Tic-Tac-Toe · {}", self.session.mode()),
            GameMode::VsAi => format!(
                "Tic-Tac-Toe · {} ({})",
                self.session.mode(),
                self.session.difficulty().label()
            ),
        };
        frame.render_widget(title_bar(title), chunks[0]);

        let score = Paragraph::new(tally_text(ctx.book.tally()))
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Score"));
        frame.render_widget(score, chunks[1]);

        render_board(frame, chunks[2], self.session.game(), Some(self.cursor));

        let status = Paragraph::new(self.status_text())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, chunks[3]);

        frame.render_widget(
            help_bar("1-9 / arrows + Enter: Move | r: Restart | Esc: Menu | q: Quit"),
            chunks[4],
        );
    }

    #[instrument(skip(self, _ctx))]
    fn handle_action(&mut self, action: Action, _ctx: &mut AppContext) -> ScreenTransition {
        match action {
            Action::Cell(pos) => self.play(pos),
            Action::Confirm => self.play(self.cursor),
            Action::Up => self.cursor = move_cursor(self.cursor, -1, 0),
            Action::Down => self.cursor = move_cursor(self.cursor, 1, 0),
            Action::Left => self.cursor = move_cursor(self.cursor, 0, -1),
            Action::Right => self.cursor = move_cursor(self.cursor, 0, 1),
            Action::Restart => {
                self.session.reset();
                self.notice = None;
            }
            Action::Back => return ScreenTransition::GoToMenu,
            Action::Quit => return ScreenTransition::Quit,
            _ => {}
        }
        ScreenTransition::Stay
    }
}
