//! Main menu screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::GameMode;
use crate::tui::keymap::Action;
use crate::tui::screen::{AppContext, Screen, ScreenKind, ScreenTransition};
use crate::tui::screens::{help_bar, tally_text, title_bar};

/// Logo presses needed to reveal the credits.
const CREDITS_CLICKS: u8 = 5;

const CREDITS: &str = "NovaCore v1.0 · Developer: mirusik123 · Brother & Legend: ehik228";

/// Menu options available in the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    PlayFriend,
    PlayAi,
    History,
    Settings,
    Quit,
}

impl MenuOption {
    fn label(self) -> &'static str {
        match self {
            Self::PlayFriend => "Play vs Friend",
            Self::PlayAi => "Play vs AI",
            Self::History => "History",
            Self::Settings => "Settings",
            Self::Quit => "Quit",
        }
    }

    fn all() -> &'static [MenuOption] {
        &[
            Self::PlayFriend,
            Self::PlayAi,
            Self::History,
            Self::Settings,
            Self::Quit,
        ]
    }

    fn transition(self) -> ScreenTransition {
        match self {
            Self::PlayFriend => ScreenTransition::StartGame(GameMode::Friend),
            Self::PlayAi => ScreenTransition::StartGame(GameMode::VsAi),
            Self::History => ScreenTransition::GoToHistory,
            Self::Settings => ScreenTransition::GoToSettings,
            Self::Quit => ScreenTransition::Quit,
        }
    }
}

/// State for the main menu.
#[derive(Debug)]
pub struct MenuScreen {
    list_state: ListState,
    logo_clicks: u8,
    show_credits: bool,
}

impl MenuScreen {
    /// Creates the menu with the first option selected.
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            list_state,
            logo_clicks: 0,
            show_credits: false,
        }
    }

    /// True once the logo has been pressed enough times.
    pub fn credits_visible(&self) -> bool {
        self.show_credits
    }

    fn select_previous(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_option(&self) -> MenuOption {
        let options = MenuOption::all();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }

    #[instrument(skip(self))]
    fn press_logo(&mut self) {
        self.logo_clicks += 1;
        debug!(clicks = self.logo_clicks, "Logo pressed");
        if self.logo_clicks >= CREDITS_CLICKS {
            info!("Credits revealed");
            self.show_credits = true;
            self.logo_clicks = 0;
        }
    }
}

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MenuScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Menu
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

        frame.render_widget(title_bar("⚡ NovaCore Tic-Tac-Toe"), chunks[0]);

        let score = Paragraph::new(tally_text(ctx.book.tally()))
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Score"));
        frame.render_widget(score, chunks[1]);

        let items: Vec<ListItem> = MenuOption::all()
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();
        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(menu, chunks[2], &mut list_state);

        let footer = if self.show_credits { CREDITS } else { "" };
        let credits = Paragraph::new(footer)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(credits, chunks[3]);

        frame.render_widget(
            help_bar("↑↓: Navigate | Enter: Select | f/a: Play | h: History | s: Settings | q: Quit"),
            chunks[4],
        );
    }

    #[instrument(skip(self, _ctx))]
    fn handle_action(&mut self, action: Action, _ctx: &mut AppContext) -> ScreenTransition {
        match action {
            Action::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            Action::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            Action::Confirm => {
                let option = self.selected_option();
                info!(option = ?option, "Menu option selected");
                option.transition()
            }
            Action::PlayFriend => MenuOption::PlayFriend.transition(),
            Action::PlayAi => MenuOption::PlayAi.transition(),
            Action::OpenHistory => ScreenTransition::GoToHistory,
            Action::OpenSettings => ScreenTransition::GoToSettings,
            Action::Logo => {
                self.press_logo();
                ScreenTransition::Stay
            }
            Action::Quit | Action::Back => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
