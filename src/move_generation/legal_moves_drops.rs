//! Pseudo-legal drop moves for the side to move.
//!
//! Applies the placement rules that need no lookahead: empty target, no
//! dead-rank drops, no second unpromoted pawn on a file. The pawn-drop-mate
//! rule and king safety are handled by the legal move generator.

use crate::game_state::shogi_rules::has_future_move;
use crate::game_state::{game_state::BoardState, shogi_types::*};
use crate::move_generation::legal_move_shared::pawn_file_mask;

pub fn generate_drop_moves(board: &BoardState, out: &mut Vec<Move>) {
    let side = board.side_to_move;
    let hand = board.hands[side.index()];
    if hand.iter().all(|count| *count == 0) {
        return;
    }

    let pawn_files = if hand[HandKind::Pawn.index()] > 0 {
        pawn_file_mask(board, side)
    } else {
        0
    };

    for kind in ALL_HAND_KINDS {
        if hand[kind.index()] == 0 {
            continue;
        }

        for (sq, occupant) in board.squares.iter().enumerate() {
            if occupant.is_some() {
                continue;
            }
            let to = sq as Square;
            if !has_future_move(kind.piece_kind(), side, to) {
                continue;
            }
            if kind == HandKind::Pawn && pawn_files & (1 << square_col(to)) != 0 {
                continue;
            }
            out.push(Move::Drop { to, kind });
        }
    }
}
