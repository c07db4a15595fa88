//! Screen implementations for the UI state machine.

mod game;
mod history;
mod menu;
mod settings;

pub use game::GameScreen;
pub use history::HistoryScreen;
pub use menu::MenuScreen;
pub use settings::SettingsScreen;

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::Tally;

/// Cyan bold title bar.
pub(crate) fn title_bar(text: impl Into<String>) -> Paragraph<'static> {
    Paragraph::new(text.into())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// Dim help line.
pub(crate) fn help_bar(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// One-line tally summary.
pub(crate) fn tally_text(tally: &Tally) -> String {
    format!("X: {}   O: {}   Draws: {}", tally.x, tally.o, tally.draw)
}
