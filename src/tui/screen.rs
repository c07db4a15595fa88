//! Screen trait and transition type for the UI state machine.

use ratatui::Frame;

use crate::tui::keymap::Action;
use crate::{AppConfig, GameMode, StatsBook};

/// Which screen is showing; selects the keymap rows that apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    /// Main menu.
    Menu,
    /// Board.
    Game,
    /// Preferences and save management.
    Settings,
    /// Past results.
    History,
}

/// Shared state screens read and update.
#[derive(Debug)]
pub struct AppContext {
    /// Tally and history.
    pub book: StatsBook,
    /// Live configuration; settings edits land here.
    pub config: AppConfig,
}

/// The result of handling an action on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Back to the main menu.
    GoToMenu,
    /// Start a fresh game.
    StartGame(GameMode),
    /// Open settings.
    GoToSettings,
    /// Open history.
    GoToHistory,
    /// Exit the application.
    Quit,
}

/// Implemented by each screen in the state machine.
pub trait Screen {
    /// Which screen this is.
    fn kind(&self) -> ScreenKind;

    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, ctx: &AppContext);

    /// Handles an action and returns the resulting [`ScreenTransition`].
    fn handle_action(&mut self, action: Action, ctx: &mut AppContext) -> ScreenTransition;
}
