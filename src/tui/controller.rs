//! Controller: the state machine driving the multi-screen TUI.

use std::ops::ControlFlow;
use std::time::Instant;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Frame, Terminal, backend::Backend};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::tui::keymap::action_for_event;
use crate::tui::screen::{AppContext, Screen, ScreenKind, ScreenTransition};
use crate::tui::screens::{GameScreen, HistoryScreen, MenuScreen, SettingsScreen};
use crate::{AppConfig, StatsBook};

/// Active screen in the state machine.
#[derive(Debug)]
enum ActiveScreen {
    Menu(MenuScreen),
    Game(GameScreen),
    Settings(SettingsScreen),
    History(HistoryScreen),
}

impl ActiveScreen {
    fn screen(&self) -> &dyn Screen {
        match self {
            Self::Menu(s) => s,
            Self::Game(s) => s,
            Self::Settings(s) => s,
            Self::History(s) => s,
        }
    }

    fn screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Menu(s) => s,
            Self::Game(s) => s,
            Self::Settings(s) => s,
            Self::History(s) => s,
        }
    }
}

/// Owns the shared context and the active screen.
///
/// Key events go through [`Controller::handle_key`], timed work through
/// [`Controller::tick`]. Call [`Controller::run`] to drive both from a
/// terminal.
#[derive(Debug)]
pub struct Controller {
    ctx: AppContext,
    rng: StdRng,
    screen: ActiveScreen,
}

impl Controller {
    /// Creates a controller on the main menu with an entropy-seeded AI.
    #[instrument(skip_all)]
    pub fn new(config: AppConfig, book: StatsBook) -> Self {
        Self::with_rng(config, book, StdRng::from_entropy())
    }

    /// Creates a controller whose AI randomness is reproducible.
    pub fn with_seed(config: AppConfig, book: StatsBook, seed: u64) -> Self {
        Self::with_rng(config, book, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: AppConfig, book: StatsBook, rng: StdRng) -> Self {
        info!("Creating Controller");
        Self {
            ctx: AppContext { book, config },
            rng,
            screen: ActiveScreen::Menu(MenuScreen::new()),
        }
    }

    /// Shared statistics and configuration.
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Which screen is showing.
    pub fn screen_kind(&self) -> ScreenKind {
        self.screen.screen().kind()
    }

    /// The game screen, if a game is showing.
    pub fn game_screen(&self) -> Option<&GameScreen> {
        match &self.screen {
            ActiveScreen::Game(s) => Some(s),
            _ => None,
        }
    }

    /// Translates a key press through the keymap and dispatches it.
    ///
    /// Returns [`ControlFlow::Break`] when the user asked to quit.
    #[instrument(skip(self), fields(screen = ?self.screen_kind()))]
    pub fn handle_key(&mut self, key: KeyEvent) -> ControlFlow<()> {
        let Some(action) = action_for_event(self.screen_kind(), &key) else {
            debug!(code = ?key.code, "Unbound key");
            return ControlFlow::Continue(());
        };

        let transition = self.screen.screen_mut().handle_action(action, &mut self.ctx);
        self.apply_transition(transition)
    }

    /// Runs timed work for the active screen.
    pub fn tick(&mut self, now: Instant) {
        if let ActiveScreen::Game(game) = &mut self.screen {
            game.tick(now, &mut self.rng, &mut self.ctx);
        }
    }

    /// Renders the active screen.
    pub fn draw(&self, frame: &mut Frame) {
        self.screen.screen().render(frame, &self.ctx);
    }

    #[instrument(skip(self))]
    fn apply_transition(&mut self, transition: ScreenTransition) -> ControlFlow<()> {
        let next = match transition {
            ScreenTransition::Stay => return ControlFlow::Continue(()),
            ScreenTransition::Quit => {
                info!("Quitting");
                return ControlFlow::Break(());
            }
            ScreenTransition::GoToMenu => ActiveScreen::Menu(MenuScreen::new()),
            ScreenTransition::StartGame(mode) => {
                ActiveScreen::Game(GameScreen::new(mode, &self.ctx.config))
            }
            ScreenTransition::GoToSettings => ActiveScreen::Settings(SettingsScreen::new()),
            ScreenTransition::GoToHistory => ActiveScreen::History(HistoryScreen::new()),
        };
        debug!(from = ?self.screen_kind(), to = ?next.screen().kind(), "Screen transition");
        self.screen = next;
        ControlFlow::Continue(())
    }

    /// Runs the event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting event loop");

        loop {
            self.tick(Instant::now());
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // crossterm fires both press and release on some platforms.
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if self.handle_key(key).is_break() {
                    return Ok(());
                }
            }

            sleep(Duration::from_millis(10)).await;
        }
    }
}
