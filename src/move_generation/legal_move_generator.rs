//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal board moves and drops, then filters each candidate by
//! applying it, asking whether the mover's king is attacked, and reverting.
//! Pawn drops that give check are additionally tested for the pawn-drop-mate
//! rule.

use crate::game_state::{game_state::BoardState, shogi_types::*};
use crate::move_generation::legal_move_apply::{apply_move, revert_move};
use crate::move_generation::legal_move_checks::{is_in_check, king_square};
use crate::move_generation::legal_moves_board::generate_board_moves;
use crate::move_generation::legal_moves_drops::generate_drop_moves;

/// Typical upper bound on pseudo-legal moves; only a capacity hint.
const MOVE_BUFFER_CAPACITY: usize = 256;

/// Every legal move for the side to move. Empty once the game is over.
///
/// The board is borrowed mutably for speculative apply/revert and is
/// restored exactly before returning.
pub fn generate_legal_moves(board: &mut BoardState) -> Vec<Move> {
    if board.is_over() {
        return Vec::new();
    }

    let mut moves = Vec::with_capacity(MOVE_BUFFER_CAPACITY);
    generate_pseudo_legal_moves(board, &mut moves);
    moves.retain(|mv| is_legal_candidate(board, *mv));
    moves
}

/// Whether the side to move has at least one legal move. Stops at the first.
pub fn has_any_legal_move(board: &mut BoardState) -> bool {
    if board.is_over() {
        return false;
    }

    let mut moves = Vec::with_capacity(MOVE_BUFFER_CAPACITY);
    generate_pseudo_legal_moves(board, &mut moves);
    moves.into_iter().any(|mv| is_legal_candidate(board, mv))
}

pub fn generate_pseudo_legal_moves(board: &BoardState, out: &mut Vec<Move>) {
    generate_board_moves(board, out);
    generate_drop_moves(board, out);
}

/// King safety and pawn-drop-mate test for a pseudo-legal move.
pub(crate) fn is_legal_candidate(board: &mut BoardState, mv: Move) -> bool {
    let mover = board.side_to_move;
    let record = apply_move(board, mv);

    let legal = !is_in_check(board, mover) && !is_pawn_drop_mate(board, mv, mover);

    revert_move(board, &record);
    legal
}

/// Called with `mv` already applied. True when `mv` is a pawn drop that
/// checks the opponent king and leaves it without a legal reply.
pub(crate) fn is_pawn_drop_mate(board: &mut BoardState, mv: Move, mover: Color) -> bool {
    let Move::Drop {
        to,
        kind: HandKind::Pawn,
    } = mv
    else {
        return false;
    };

    let defender = mover.opponent();
    let Some(defender_king) = king_square(board, defender) else {
        return false;
    };
    if offset_square(to, mover.forward(), 0) != Some(defender_king) {
        return false;
    }

    // The defender is in check from an adjacent pawn, so none of its own
    // pawn drops survive the king-safety test and this cannot recurse again.
    !has_any_legal_move(board)
}
