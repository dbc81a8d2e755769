//! Targeted attack queries.
//!
//! `is_square_attacked` walks outward from the target square instead of
//! scanning the attacker's pieces: eight rays plus the two knight sources.
//! That keeps king-safety filtering cheap enough to run once per candidate
//! move.

use crate::game_state::{game_state::BoardState, shogi_types::*};
use crate::moves::piece_geometry::{
    knight_offsets, opposite_direction, slide_mask, step_mask, DIRECTIONS,
};

#[inline]
pub fn king_square(board: &BoardState, color: Color) -> Option<Square> {
    board.king_squares[color.index()]
}

/// Whether `color`'s king is attacked. A side without a king is never in check.
#[inline]
pub fn is_in_check(board: &BoardState, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opponent())
}

pub fn is_square_attacked(board: &BoardState, square: Square, attacker_color: Color) -> bool {
    for (dir, (dr, dc)) in DIRECTIONS.iter().copied().enumerate() {
        // A piece found along `dir` reaches `square` by moving the other way.
        let toward_target = 1u8 << opposite_direction(dir);
        let mut current = square;
        let mut distance = 0u8;

        while let Some(next) = offset_square(current, dr, dc) {
            distance += 1;
            if let Some(piece) = board.piece_at(next) {
                if piece.color == attacker_color
                    && (slide_mask(piece) & toward_target != 0
                        || (distance == 1 && step_mask(piece) & toward_target != 0))
                {
                    return true;
                }
                break;
            }
            current = next;
        }
    }

    let knight = Piece::new(PieceKind::Knight, attacker_color);
    for (dr, dc) in knight_offsets(attacker_color) {
        if let Some(from) = offset_square(square, -dr, -dc) {
            if board.piece_at(from) == Some(knight) {
                return true;
            }
        }
    }

    false
}

/// Squares holding `attacker_color` pieces that attack `square`.
pub fn attackers_to_square(board: &BoardState, square: Square, attacker_color: Color) -> Vec<Square> {
    let mut attackers = Vec::new();

    for (dir, (dr, dc)) in DIRECTIONS.iter().copied().enumerate() {
        let toward_target = 1u8 << opposite_direction(dir);
        let mut current = square;
        let mut distance = 0u8;

        while let Some(next) = offset_square(current, dr, dc) {
            distance += 1;
            if let Some(piece) = board.piece_at(next) {
                if piece.color == attacker_color
                    && (slide_mask(piece) & toward_target != 0
                        || (distance == 1 && step_mask(piece) & toward_target != 0))
                {
                    attackers.push(next);
                }
                break;
            }
            current = next;
        }
    }

    let knight = Piece::new(PieceKind::Knight, attacker_color);
    for (dr, dc) in knight_offsets(attacker_color) {
        if let Some(from) = offset_square(square, -dr, -dc) {
            if board.piece_at(from) == Some(knight) {
                attackers.push(from);
            }
        }
    }

    attackers
}
