//! Single-move legality check.
//!
//! `validate_move` re-derives legality for one candidate without generating
//! the full move list. It is the guard every external move (notation input,
//! policy actions) passes before reaching `apply_move`.

use thiserror::Error;

use crate::game_state::shogi_rules::{can_promote, has_future_move, must_promote};
use crate::game_state::{game_state::BoardState, shogi_types::*};
use crate::move_generation::legal_move_apply::{apply_move, revert_move};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::is_pawn_drop_mate;
use crate::move_generation::legal_move_shared::{pawn_file_mask, piece_reaches};

/// Reasons a move can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum IllegalMoveKind {
    #[error("the game is already over")]
    GameOver,
    #[error("square index outside the board")]
    OutOfBounds,
    #[error("origin and destination are the same square")]
    NullMove,
    #[error("no piece on the origin square")]
    EmptyOrigin,
    #[error("the piece on the origin square belongs to the opponent")]
    NotYourPiece,
    #[error("the destination holds one of your own pieces")]
    OwnPieceOnDestination,
    #[error("the piece cannot reach the destination")]
    Unreachable,
    #[error("this piece cannot promote")]
    CannotPromote,
    #[error("promotion requires starting or ending in the promotion zone")]
    PromotionOutsideZone,
    #[error("the piece must promote on this square")]
    PromotionRequired,
    #[error("no piece of that kind in hand")]
    NotInHand,
    #[error("drop target is occupied")]
    DropOnOccupiedSquare,
    #[error("a dropped piece would have no legal move from that square")]
    DropOnDeadRank,
    #[error("an unpromoted pawn of yours already stands on that file")]
    DoublePawn,
    #[error("a pawn drop may not deliver checkmate")]
    PawnDropMate,
    #[error("the move leaves your king in check")]
    LeavesKingInCheck,
}

/// Check `mv` for the side to move. The board is restored before returning.
pub fn validate_move(board: &mut BoardState, mv: Move) -> Result<(), IllegalMoveKind> {
    if board.is_over() {
        return Err(IllegalMoveKind::GameOver);
    }

    let side = board.side_to_move;
    match mv {
        Move::Board { from, to, promote } => {
            if from as usize >= NUM_SQUARES || to as usize >= NUM_SQUARES {
                return Err(IllegalMoveKind::OutOfBounds);
            }
            if from == to {
                return Err(IllegalMoveKind::NullMove);
            }
            let piece = board.piece_at(from).ok_or(IllegalMoveKind::EmptyOrigin)?;
            if piece.color != side {
                return Err(IllegalMoveKind::NotYourPiece);
            }
            if board.piece_at(to).is_some_and(|p| p.color == side) {
                return Err(IllegalMoveKind::OwnPieceOnDestination);
            }
            if !piece_reaches(board, from, piece, to) {
                return Err(IllegalMoveKind::Unreachable);
            }
            if promote {
                if !piece.kind.is_promotable() {
                    return Err(IllegalMoveKind::CannotPromote);
                }
                if !can_promote(piece.kind, side, from, to) {
                    return Err(IllegalMoveKind::PromotionOutsideZone);
                }
            } else if must_promote(piece.kind, side, to) {
                return Err(IllegalMoveKind::PromotionRequired);
            }
        }
        Move::Drop { to, kind } => {
            if to as usize >= NUM_SQUARES {
                return Err(IllegalMoveKind::OutOfBounds);
            }
            if board.hand_count(side, kind) == 0 {
                return Err(IllegalMoveKind::NotInHand);
            }
            if board.piece_at(to).is_some() {
                return Err(IllegalMoveKind::DropOnOccupiedSquare);
            }
            if !has_future_move(kind.piece_kind(), side, to) {
                return Err(IllegalMoveKind::DropOnDeadRank);
            }
            if kind == HandKind::Pawn && pawn_file_mask(board, side) & (1 << square_col(to)) != 0 {
                return Err(IllegalMoveKind::DoublePawn);
            }
        }
    }

    let record = apply_move(board, mv);
    let verdict = if is_in_check(board, side) {
        Err(IllegalMoveKind::LeavesKingInCheck)
    } else if is_pawn_drop_mate(board, mv, side) {
        Err(IllegalMoveKind::PawnDropMate)
    } else {
        Ok(())
    };
    revert_move(board, &record);
    verdict
}
