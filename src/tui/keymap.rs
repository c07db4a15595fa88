//! Event-to-action mapping table.
//!
//! Screens never inspect raw key codes. Every key press is looked up in
//! [`KEYMAP`] for the active screen and only the resulting [`Action`] is
//! dispatched.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nova_tictactoe::Position;

use crate::tui::screen::ScreenKind;

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move the selection or cursor up.
    Up,
    /// Move the selection or cursor down.
    Down,
    /// Move the cursor left.
    Left,
    /// Move the cursor right.
    Right,
    /// Activate the selected item or play at the cursor.
    Confirm,
    /// Leave the current screen.
    Back,
    /// Exit the application.
    Quit,
    /// Place a mark directly.
    Cell(Position),
    /// Start over on the current board.
    Restart,
    /// Start a two-player game.
    PlayFriend,
    /// Start a game against the AI.
    PlayAi,
    /// Open the history screen.
    OpenHistory,
    /// Open the settings screen.
    OpenSettings,
    /// Click on the logo.
    Logo,
    /// Cycle the AI level.
    CycleLevel,
    /// Write the save file.
    Export,
    /// Read the save file.
    Import,
    /// Clear statistics and history.
    ResetStats,
}

/// Where a binding applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every screen.
    Any,
    /// One screen only.
    Only(ScreenKind),
}

/// One row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Screens the binding applies to.
    pub scope: Scope,
    /// Key code, letters lower-cased.
    pub key: KeyCode,
    /// Resulting action.
    pub action: Action,
}

const fn on(screen: ScreenKind, key: KeyCode, action: Action) -> Binding {
    Binding {
        scope: Scope::Only(screen),
        key,
        action,
    }
}

const fn any(key: KeyCode, action: Action) -> Binding {
    Binding {
        scope: Scope::Any,
        key,
        action,
    }
}

/// Screen-specific rows come first so they shadow the global ones.
pub const KEYMAP: &[Binding] = &[
    // Menu
    on(ScreenKind::Menu, KeyCode::Char('f'), Action::PlayFriend),
    on(ScreenKind::Menu, KeyCode::Char('a'), Action::PlayAi),
    on(ScreenKind::Menu, KeyCode::Char('h'), Action::OpenHistory),
    on(ScreenKind::Menu, KeyCode::Char('s'), Action::OpenSettings),
    on(ScreenKind::Menu, KeyCode::Char('n'), Action::Logo),
    // Game
    on(ScreenKind::Game, KeyCode::Char('1'), Action::Cell(Position::TopLeft)),
    on(ScreenKind::Game, KeyCode::Char('2'), Action::Cell(Position::TopCenter)),
    on(ScreenKind::Game, KeyCode::Char('3'), Action::Cell(Position::TopRight)),
    on(ScreenKind::Game, KeyCode::Char('4'), Action::Cell(Position::MiddleLeft)),
    on(ScreenKind::Game, KeyCode::Char('5'), Action::Cell(Position::Center)),
    on(ScreenKind::Game, KeyCode::Char('6'), Action::Cell(Position::MiddleRight)),
    on(ScreenKind::Game, KeyCode::Char('7'), Action::Cell(Position::BottomLeft)),
    on(ScreenKind::Game, KeyCode::Char('8'), Action::Cell(Position::BottomCenter)),
    on(ScreenKind::Game, KeyCode::Char('9'), Action::Cell(Position::BottomRight)),
    on(ScreenKind::Game, KeyCode::Char(' '), Action::Confirm),
    on(ScreenKind::Game, KeyCode::Char('r'), Action::Restart),
    on(ScreenKind::Game, KeyCode::Char('m'), Action::Back),
    // Settings
    on(ScreenKind::Settings, KeyCode::Char('l'), Action::CycleLevel),
    on(ScreenKind::Settings, KeyCode::Char('e'), Action::Export),
    on(ScreenKind::Settings, KeyCode::Char('i'), Action::Import),
    on(ScreenKind::Settings, KeyCode::Char('x'), Action::ResetStats),
    // History
    on(ScreenKind::History, KeyCode::Char('b'), Action::Back),
    // Everywhere
    any(KeyCode::Up, Action::Up),
    any(KeyCode::Down, Action::Down),
    any(KeyCode::Left, Action::Left),
    any(KeyCode::Right, Action::Right),
    any(KeyCode::Enter, Action::Confirm),
    any(KeyCode::Esc, Action::Back),
    any(KeyCode::Char('q'), Action::Quit),
];

/// Looks up the action bound to `key` on `screen`.
pub fn action_for(screen: ScreenKind, key: KeyCode) -> Option<Action> {
    KEYMAP
        .iter()
        .find(|b| b.key == key && (b.scope == Scope::Any || b.scope == Scope::Only(screen)))
        .map(|b| b.action)
}

/// Maps a full key event, folding letter case and treating Ctrl-C as quit.
pub fn action_for_event(screen: ScreenKind, event: &KeyEvent) -> Option<Action> {
    match event.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if event.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Action::Quit)
        }
        KeyCode::Char(c) => action_for(screen, KeyCode::Char(c.to_ascii_lowercase())),
        code => action_for(screen, code),
    }
}
