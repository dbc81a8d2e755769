//! Terminal-oriented board renderer.
//!
//! Creates a human-readable diagram with USI coordinates, White's reserve on
//! top and Black's below, for debugging, tests and diagnostics.

use crate::game_state::{game_state::BoardState, shogi_types::*};

/// Render the board to a string. White pieces are lowercase as in SFEN,
/// promoted pieces carry a leading `+`.
pub fn render_game_state(board: &BoardState) -> String {
    let mut out = String::new();

    out.push_str(&format!("white hand: {}\n", render_hand(board, Color::White)));
    out.push_str("   9  8  7  6  5  4  3  2  1\n");

    for row in 0..BOARD_SIZE as u8 {
        out.push(' ');
        for col in 0..BOARD_SIZE as u8 {
            out.push_str(&render_cell(board.piece_at_rc(row, col)));
        }
        out.push(' ');
        out.push(char::from(b'a' + row));
        out.push('\n');
    }

    out.push_str(&format!("black hand: {}\n", render_hand(board, Color::Black)));
    out.push_str(&format!(
        "{} to move, ply {}",
        board.side_to_move, board.ply
    ));

    out
}

fn render_cell(piece: Option<Piece>) -> String {
    let Some(piece) = piece else {
        return "  ·".to_owned();
    };

    let letter = piece_letter(piece.kind.unpromote());
    let letter = match piece.color {
        Color::Black => letter,
        Color::White => letter.to_ascii_lowercase(),
    };
    let promoted = if piece.is_promoted() { '+' } else { ' ' };
    format!(" {promoted}{letter}")
}

fn render_hand(board: &BoardState, color: Color) -> String {
    let parts: Vec<String> = ALL_HAND_KINDS
        .iter()
        .filter(|kind| board.hand_count(color, **kind) > 0)
        .map(|kind| format!("{}x{}", kind.drop_code(), board.hand_count(color, *kind)))
        .collect();

    if parts.is_empty() {
        "-".to_owned()
    } else {
        parts.join(" ")
    }
}

fn piece_letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::King => 'K',
        other => other
            .hand_kind()
            .map_or('?', |hand_kind| hand_kind.drop_code()),
    }
}
