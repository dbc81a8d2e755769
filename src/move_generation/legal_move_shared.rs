//! Helpers shared by the pseudo-legal generators and the move validator.

use crate::game_state::shogi_rules::{can_promote, must_promote};
use crate::game_state::{game_state::BoardState, shogi_types::*};
use crate::moves::piece_geometry::{slide_mask, step_targets, DIRECTIONS};

/// Call `visit` for every square `piece` standing on `from` could move to:
/// empty squares and squares holding an opponent piece. Sliders stop at the
/// first occupied square.
pub fn for_each_target(board: &BoardState, from: Square, piece: Piece, mut visit: impl FnMut(Square)) {
    let slides = slide_mask(piece);

    for (dir, (dr, dc)) in DIRECTIONS.iter().copied().enumerate() {
        if slides & (1u8 << dir) == 0 {
            continue;
        }
        let mut current = from;
        while let Some(next) = offset_square(current, dr, dc) {
            match board.piece_at(next) {
                None => visit(next),
                Some(other) => {
                    if other.color != piece.color {
                        visit(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }

    // Step and slide masks never share a direction.
    for next in step_targets(piece, from) {
        if is_enterable(board, next, piece.color) {
            visit(next);
        }
    }
}

/// Whether `piece` on `from` can reach `to` under current occupancy.
pub fn piece_reaches(board: &BoardState, from: Square, piece: Piece, to: Square) -> bool {
    let mut found = false;
    for_each_target(board, from, piece, |target| found |= target == to);
    found
}

#[inline]
fn is_enterable(board: &BoardState, square: Square, mover: Color) -> bool {
    board.piece_at(square).map_or(true, |p| p.color != mover)
}

/// Push the promotion variants allowed for `piece` moving `from -> to`:
/// forced promotion only, optional promotion both, otherwise plain.
#[inline]
pub fn push_board_move_variants(piece: Piece, from: Square, to: Square, out: &mut Vec<Move>) {
    let forced = must_promote(piece.kind, piece.color, to);
    if !forced {
        out.push(Move::Board {
            from,
            to,
            promote: false,
        });
    }
    if can_promote(piece.kind, piece.color, from, to) {
        out.push(Move::Board {
            from,
            to,
            promote: true,
        });
    }
}

/// Bit `col` is set when `color` has an unpromoted pawn on that file.
pub fn pawn_file_mask(board: &BoardState, color: Color) -> u16 {
    let pawn = Piece::new(PieceKind::Pawn, color);
    let mut mask = 0u16;
    for (sq, occupant) in board.squares.iter().enumerate() {
        if *occupant == Some(pawn) {
            mask |= 1 << square_col(sq as Square);
        }
    }
    mask
}
