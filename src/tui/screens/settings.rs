//! Settings screen: AI level and save-file management.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{info, instrument, warn};

use crate::tui::keymap::Action;
use crate::tui::screen::{AppContext, Screen, ScreenKind, ScreenTransition};
use crate::tui::screens::{help_bar, title_bar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsItem {
    Level,
    Export,
    Import,
    Reset,
    Back,
}

impl SettingsItem {
    const ALL: [SettingsItem; 5] = [
        Self::Level,
        Self::Export,
        Self::Import,
        Self::Reset,
        Self::Back,
    ];

    fn label(self, ctx: &AppContext) -> String {
        match self {
            Self::Level => format!("AI level: {}", ctx.config.difficulty().label()),
            Self::Export => format!("Export to {}", ctx.config.export_path().display()),
            Self::Import => format!("Import from {}", ctx.config.export_path().display()),
            Self::Reset => "Reset statistics".to_string(),
            Self::Back => "Back".to_string(),
        }
    }
}

/// State for the settings screen.
#[derive(Debug)]
pub struct SettingsScreen {
    list_state: ListState,
    message: Option<String>,
}

impl SettingsScreen {
    /// Creates the screen with the AI level selected.
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            list_state,
            message: None,
        }
    }

    /// Feedback from the last operation, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn selected(&self) -> SettingsItem {
        let idx = self.list_state.selected().unwrap_or(0);
        SettingsItem::ALL[idx.min(SettingsItem::ALL.len() - 1)]
    }

    fn step(&mut self, delta: isize) {
        let count = SettingsItem::ALL.len() as isize;
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(count) as usize;
        self.list_state.select(Some(next));
    }

    fn activate(&mut self, item: SettingsItem, ctx: &mut AppContext) -> ScreenTransition {
        match item {
            SettingsItem::Level => self.cycle_level(ctx),
            SettingsItem::Export => self.export(ctx),
            SettingsItem::Import => self.import(ctx),
            SettingsItem::Reset => self.reset(ctx),
            SettingsItem::Back => return ScreenTransition::GoToMenu,
        }
        ScreenTransition::Stay
    }

    #[instrument(skip_all)]
    fn cycle_level(&mut self, ctx: &mut AppContext) {
        let level = ctx.config.difficulty().next();
        ctx.config = ctx.config.clone().with_difficulty(level);
        info!(%level, "AI level changed");
        self.message = Some(format!("AI level set to {}", level.label()));
    }

    #[instrument(skip_all)]
    fn export(&mut self, ctx: &mut AppContext) {
        let path = ctx.config.export_path().clone();
        self.message = Some(match ctx.book.export_to(&path) {
            Ok(()) => format!("Saved to {}", path.display()),
            Err(e) => {
                warn!(error = %e, "Export failed");
                format!("Export failed: {}", e)
            }
        });
    }

    #[instrument(skip_all)]
    fn import(&mut self, ctx: &mut AppContext) {
        let path = ctx.config.export_path().clone();
        self.message = Some(match ctx.book.import_from(&path) {
            Ok(summary) => {
                let records = summary
                    .history_records()
                    .map(|n| format!(", {} history records", n))
                    .unwrap_or_default();
                format!("Imported from {}{}", path.display(), records)
            }
            Err(e) => {
                warn!(error = %e, "Import failed");
                format!("Import failed: {}; keeping current statistics", e)
            }
        });
    }

    #[instrument(skip_all)]
    fn reset(&mut self, ctx: &mut AppContext) {
        self.message = Some(match ctx.book.reset() {
            Ok(()) => "Statistics reset".to_string(),
            Err(e) => {
                warn!(error = %e, "Reset failed");
                format!("Reset failed: {}", e)
            }
        });
    }
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for SettingsScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Settings
    }

    fn render(&self, frame: &mut Frame, ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(7),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(title_bar("Settings"), chunks[0]);

        let items: Vec<ListItem> = SettingsItem::ALL
            .iter()
            .map(|item| ListItem::new(item.label(ctx)))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Options"))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let message = Paragraph::new(self.message.clone().unwrap_or_default())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(message, chunks[2]);

        frame.render_widget(
            help_bar("↑↓ + Enter | l: Level | e: Export | i: Import | x: Reset | Esc: Back"),
            chunks[3],
        );
    }

    #[instrument(skip(self, ctx))]
    fn handle_action(&mut self, action: Action, ctx: &mut AppContext) -> ScreenTransition {
        match action {
            Action::Up => self.step(-1),
            Action::Down => self.step(1),
            Action::Confirm => return self.activate(self.selected(), ctx),
            Action::CycleLevel => self.cycle_level(ctx),
            Action::Export => self.export(ctx),
            Action::Import => self.import(ctx),
            Action::ResetStats => self.reset(ctx),
            Action::Back => return ScreenTransition::GoToMenu,
            Action::Quit => return ScreenTransition::Quit,
            _ => {}
        }
        ScreenTransition::Stay
    }
}
