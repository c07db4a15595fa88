//! Tests for the TUI controller, driven through key events.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nova_core::nova_tictactoe::{GameStatus, Position};
use nova_core::tui::ScreenKind;
use nova_core::{AppConfig, Controller, GameMode, MemoryStore, StatsBook};
use ratatui::{Terminal, backend::TestBackend};

fn controller() -> Controller {
    let book = StatsBook::load(MemoryStore::new()).expect("Load failed");
    let config = AppConfig::default().with_ai_delay_ms(0);
    Controller::with_seed(config, book, 42)
}

fn press(controller: &mut Controller, c: char) -> bool {
    controller
        .handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
        .is_continue()
}

fn press_code(controller: &mut Controller, code: KeyCode) -> bool {
    controller
        .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
        .is_continue()
}

fn rendered(controller: &Controller) -> String {
    let mut terminal = Terminal::new(TestBackend::new(90, 30)).expect("Terminal failed");
    terminal.draw(|f| controller.draw(f)).expect("Draw failed");
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn cell_key(pos: Position) -> char {
    char::from_digit(pos.to_index() as u32 + 1, 10).expect("Single digit")
}

#[test]
fn test_menu_renders_title_and_score() {
    let controller = controller();
    let screen = rendered(&controller);
    assert!(screen.contains("NovaCore"));
    assert!(screen.contains("Draws: 0"));
}

#[test]
fn test_logo_presses_reveal_credits() {
    let mut controller = controller();
    for _ in 0..4 {
        press(&mut controller, 'n');
    }
    assert!(!rendered(&controller).contains("mirusik123"));
    press(&mut controller, 'n');
    assert!(rendered(&controller).contains("mirusik123"));
}

#[test]
fn test_navigation_between_screens() {
    let mut controller = controller();
    press(&mut controller, 'h');
    assert_eq!(controller.screen_kind(), ScreenKind::History);
    assert!(rendered(&controller).contains("History is empty"));

    press_code(&mut controller, KeyCode::Esc);
    assert_eq!(controller.screen_kind(), ScreenKind::Menu);

    press(&mut controller, 's');
    assert_eq!(controller.screen_kind(), ScreenKind::Settings);
    press_code(&mut controller, KeyCode::Esc);

    press(&mut controller, 'f');
    assert_eq!(controller.screen_kind(), ScreenKind::Game);
    let game = controller.game_screen().expect("Game screen");
    assert_eq!(game.session().mode(), GameMode::Friend);
}

#[test]
fn test_quit_breaks_from_any_screen() {
    let mut controller = controller();
    press(&mut controller, 'a');
    assert!(!press(&mut controller, 'q'));

    let mut controller = self::controller();
    assert!(!press_code(&mut controller, KeyCode::Esc));
}

#[test]
fn test_ai_game_is_recorded_once() {
    let mut controller = controller();
    press(&mut controller, 'a');

    while controller
        .game_screen()
        .expect("Game screen")
        .session()
        .game()
        .is_active()
    {
        let pos = controller
            .game_screen()
            .expect("Game screen")
            .session()
            .game()
            .board()
            .empty_positions()[0];
        press(&mut controller, cell_key(pos));
        controller.tick(Instant::now());
    }
    controller.tick(Instant::now());
    controller.tick(Instant::now());

    let status = controller
        .game_screen()
        .expect("Game screen")
        .session()
        .game()
        .status();
    assert_eq!(status, GameStatus::Won(nova_core::AI_MARK));
    assert_eq!(controller.context().book.tally().total(), 1);
    assert_eq!(controller.context().book.history().len(), 1);
    assert!(rendered(&controller).contains("Player O wins!"));

    press(&mut controller, 'r');
    assert_eq!(
        controller
            .game_screen()
            .expect("Game screen")
            .session()
            .game()
            .move_count(),
        0
    );
    assert_eq!(controller.context().book.tally().total(), 1);
}

#[test]
fn test_cursor_play_with_arrows_and_enter() {
    let mut controller = controller();
    press(&mut controller, 'f');
    press_code(&mut controller, KeyCode::Up);
    press_code(&mut controller, KeyCode::Left);
    press_code(&mut controller, KeyCode::Enter);

    let game = controller.game_screen().expect("Game screen");
    assert_eq!(game.cursor(), Position::TopLeft);
    assert!(!game.session().game().board().is_empty(Position::TopLeft));
}
