//! Board widget and cursor movement.

use nova_tictactoe::{Game, Player, Position, Square, winning_line};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Moves cursor based on direction actions, stopping at the edges.
pub fn move_cursor(cursor: Position, d_row: isize, d_col: isize) -> Position {
    let (row, col) = cursor.row_col();
    let row = (row as isize + d_row).clamp(0, 2) as usize;
    let col = (col as isize + d_col).clamp(0, 2) as usize;
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

/// Renders the board, highlighting the winning triple and the cursor.
pub fn render_board(frame: &mut Frame, area: Rect, game: &Game, cursor: Option<Position>) {
    let winning = winning_line(game.board()).map(|(_, line)| line);
    let separator = Line::from("───┼───┼───").style(Style::default().fg(Color::DarkGray));

    let mut lines = Vec::with_capacity(5);
    for row in 0..3 {
        let mut spans = Vec::with_capacity(5);
        for col in 0..3 {
            let pos = Position::ALL[row * 3 + col];
            let (text, mut style) = match game.board().get(pos) {
                Square::Empty => (
                    format!(" {} ", pos.to_index() + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Square::Occupied(player) => (format!(" {} ", player), mark_style(player)),
            };
            if winning.is_some_and(|line| line.contains(&pos)) {
                style = style.bg(Color::Green).fg(Color::Black);
            }
            if cursor == Some(pos) && game.is_active() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
            if col < 2 {
                spans.push(Span::raw("│"));
            }
        }
        lines.push(Line::from(spans));
        if row < 2 {
            lines.push(separator.clone());
        }
    }

    let board = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Board"));
    frame.render_widget(board, area);
}

fn mark_style(player: Player) -> Style {
    let color = match player {
        Player::X => Color::Cyan,
        Player::O => Color::Magenta,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
