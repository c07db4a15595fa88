//! Terminal UI.

mod board;
mod controller;
pub mod keymap;
mod screen;
mod screens;

pub use board::{move_cursor, render_board};
pub use controller::Controller;
pub use screen::{AppContext, Screen, ScreenKind, ScreenTransition};
pub use screens::{GameScreen, HistoryScreen, MenuScreen, SettingsScreen};

use std::panic::{self, PanicHookInfo};
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info, instrument};

use crate::{AppConfig, StatsBook};

/// Runs the TUI until the user quits, restoring the terminal afterwards.
#[instrument(skip_all)]
pub async fn run_tui(config: AppConfig, book: StatsBook) -> anyhow::Result<()> {
    info!("Starting NovaCore TUI");

    let _guard = PanicRestoreGuard::install(restore_terminal);
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut controller = Controller::new(config, book);
    let res = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Event loop error");
    }
    res
}

/// Leaves raw mode and the alternate screen, ignoring failures.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
}

type PanicHook = dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static;

/// Runs `restore` ahead of the existing panic hook until dropped.
///
/// Dropping the guard puts the previous hook back.
pub struct PanicRestoreGuard {
    previous: Option<Arc<PanicHook>>,
}

impl PanicRestoreGuard {
    /// Chains `restore` in front of the current panic hook.
    pub fn install(restore: fn()) -> Self {
        let previous: Arc<PanicHook> = Arc::from(panic::take_hook());
        let chained = Arc::clone(&previous);
        panic::set_hook(Box::new(move |info| {
            restore();
            chained(info);
        }));
        debug!("Panic hook installed");
        Self {
            previous: Some(previous),
        }
    }
}

impl std::fmt::Debug for PanicRestoreGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanicRestoreGuard").finish_non_exhaustive()
    }
}

impl Drop for PanicRestoreGuard {
    fn drop(&mut self) {
        // set_hook panics on an unwinding thread.
        if std::thread::panicking() {
            return;
        }
        if let Some(previous) = self.previous.take() {
            let _ = panic::take_hook();
            panic::set_hook(Box::new(move |info| previous(info)));
        }
    }
}
