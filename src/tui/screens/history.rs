//! History screen: the tally and the most recent wins.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::keymap::Action;
use crate::tui::screen::{AppContext, Screen, ScreenKind, ScreenTransition};
use crate::tui::screens::{help_bar, tally_text, title_bar};
use crate::{GameRecord, StatsBook};

/// State for the history screen.
#[derive(Debug, Default)]
pub struct HistoryScreen;

impl HistoryScreen {
    /// Creates the history screen.
    pub fn new() -> Self {
        Self
    }

    /// Lines shown for the last `limit` records, newest first.
    pub fn lines(book: &StatsBook, limit: usize) -> Vec<String> {
        let recent = book.recent(limit);
        if recent.is_empty() {
            return vec!["History is empty".to_string()];
        }
        recent
            .into_iter()
            .map(|(ordinal, record)| format_record(ordinal, record))
            .collect()
    }
}

fn format_record(ordinal: usize, record: &GameRecord) -> String {
    format!(
        "#{}: {} won in {} moves  ({})",
        ordinal,
        record.winner(),
        record.move_count(),
        record.timestamp().with_timezone(&Local).format("%Y-%m-%d %H:%M")
    )
}

impl Screen for HistoryScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::History
    }

    fn render(&self, frame: &mut Frame, ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(title_bar("History"), chunks[0]);

        let summary = Paragraph::new(tally_text(ctx.book.tally()))
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Summary"));
        frame.render_widget(summary, chunks[1]);

        let limit = *ctx.config.history_limit();
        let lines: Vec<Line> = Self::lines(&ctx.book, limit)
            .into_iter()
            .map(Line::from)
            .collect();
        let list = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Last {} wins", limit)),
        );
        frame.render_widget(list, chunks[2]);

        frame.render_widget(help_bar("Esc / b: Back | q: Quit"), chunks[3]);
    }

    fn handle_action(&mut self, action: Action, _ctx: &mut AppContext) -> ScreenTransition {
        match action {
            Action::Back => ScreenTransition::GoToMenu,
            Action::Quit => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
