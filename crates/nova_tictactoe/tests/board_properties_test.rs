//! Property tests for terminal detection and the AI heuristic.

use nova_tictactoe::rules::LINES;
use nova_tictactoe::{
    Board, Difficulty, GameStatus, Player, Position, Square, check_terminal, choose_ai_move,
    completing_move,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arb_square() -> impl Strategy<Value = Square> {
    prop_oneof![
        Just(Square::Empty),
        Just(Square::Occupied(Player::X)),
        Just(Square::Occupied(Player::O)),
    ]
}

fn arb_board() -> impl Strategy<Value = Board> {
    proptest::array::uniform9(arb_square()).prop_map(Board::from_squares)
}

fn lines_owned_by(board: &Board) -> Vec<Player> {
    LINES
        .iter()
        .filter_map(|[a, b, c]| {
            let p = board.get(*a).player()?;
            (board.get(*b).player() == Some(p) && board.get(*c).player() == Some(p)).then_some(p)
        })
        .collect()
}

proptest! {
    #[test]
    fn three_in_a_row_is_won_by_its_owner(
        mut board in arb_board(),
        line in 0usize..8,
        player in prop_oneof![Just(Player::X), Just(Player::O)],
    ) {
        for pos in LINES[line] {
            board.set(pos, Square::Occupied(player));
        }
        let owners = lines_owned_by(&board);
        // The first completed triple in scan order decides the winner.
        prop_assert_eq!(check_terminal(&board), GameStatus::Won(owners[0]));
        if owners.iter().all(|p| *p == player) {
            prop_assert_eq!(check_terminal(&board), GameStatus::Won(player));
        }
    }

    #[test]
    fn board_with_empty_cell_and_no_line_is_in_progress(board in arb_board()) {
        if !lines_owned_by(&board).is_empty() || !board.squares().contains(&Square::Empty) {
            return Ok(());
        }
        prop_assert_eq!(check_terminal(&board), GameStatus::InProgress);
    }

    #[test]
    fn hard_never_misses_a_win(board in arb_board(), mark in prop_oneof![Just(Player::X), Just(Player::O)], seed in any::<u64>()) {
        if check_terminal(&board) != GameStatus::InProgress {
            return Ok(());
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        if let Some(winning) = completing_move(&board, mark) {
            let pick = choose_ai_move(&board, Difficulty::Hard, mark, &mut rng);
            prop_assert_eq!(pick, Some(winning));
        }
    }

    #[test]
    fn hard_blocks_when_it_cannot_win(board in arb_board(), seed in any::<u64>()) {
        if check_terminal(&board) != GameStatus::InProgress
            || completing_move(&board, Player::O).is_some()
        {
            return Ok(());
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        if let Some(threat) = completing_move(&board, Player::X) {
            prop_assert_eq!(choose_ai_move(&board, Difficulty::Hard, Player::O, &mut rng), Some(threat));
        }
    }

    #[test]
    fn every_difficulty_picks_an_empty_cell(board in arb_board(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            match choose_ai_move(&board, difficulty, Player::O, &mut rng) {
                Some(pos) => prop_assert!(board.is_empty(pos)),
                None => prop_assert!(!board.squares().contains(&Square::Empty)),
            }
        }
    }
}

#[test]
fn every_full_board_without_line_is_draw() {
    let mut draws = 0;
    for mask in 0u16..512 {
        let mut squares = [Square::Empty; 9];
        for (i, square) in squares.iter_mut().enumerate() {
            *square = if mask & (1 << i) != 0 {
                Square::Occupied(Player::X)
            } else {
                Square::Occupied(Player::O)
            };
        }
        let board = Board::from_squares(squares);
        if lines_owned_by(&board).is_empty() {
            draws += 1;
            assert_eq!(check_terminal(&board), GameStatus::Draw, "{}", board.display());
        } else {
            assert!(matches!(check_terminal(&board), GameStatus::Won(_)));
        }
    }
    assert!(draws > 0);
}

#[test]
fn hard_completes_top_row() {
    let board: Board = "XX.......".parse().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let pick = choose_ai_move(&board, Difficulty::Hard, Player::X, &mut rng);
    assert_eq!(pick.map(Position::to_index), Some(2));
    // The block reaches the same cell when the AI plays O.
    let pick = choose_ai_move(&board, Difficulty::Hard, Player::O, &mut rng);
    assert_eq!(pick.map(Position::to_index), Some(2));
}

#[test]
fn easy_spreads_over_empty_cells() {
    let board: Board = "XO.......".parse().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..500 {
        if let Some(pos) = choose_ai_move(&board, Difficulty::Easy, Player::O, &mut rng) {
            seen.insert(pos);
        }
    }
    assert_eq!(seen.len(), 7);
}

#[test]
fn game_round_trips_through_json() {
    let mut game = nova_tictactoe::Game::new();
    game.make_move(4).unwrap();
    game.make_move(0).unwrap();
    let json = serde_json::to_string(&game).unwrap();
    let back: nova_tictactoe::Game = serde_json::from_str(&json).unwrap();
    assert_eq!(back, game);
}
