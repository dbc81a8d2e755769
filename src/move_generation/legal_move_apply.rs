//! Move executor: in-place `apply_move` and its exact inverse `revert_move`.
//!
//! `apply_move` trusts its input. Callers holding moves from outside the
//! generator must run `validate_move` first. The only checks made here guard
//! the board invariants (a piece on the origin, a non-empty reserve, no
//! self-capture); breaking one of those is a bug and panics.

use log::{debug, error};

use crate::game_state::game_status::{GameStatus, TerminationReason};
use crate::game_state::zobrist::{hand_count_key, piece_square_key, side_to_move_key};
use crate::game_state::{game_state::BoardState, shogi_types::*, undo_state::MoveRecord};

/// Apply `mv` for the side to move and push its undo record.
///
/// # Panics
/// If the move is inconsistent with the board (empty origin, moving an
/// opponent piece, capturing an own piece, dropping a piece not in hand or
/// onto an occupied square).
pub fn apply_move(board: &mut BoardState, mv: Move) -> MoveRecord {
    let mover = board.side_to_move;
    let mut record = MoveRecord {
        mv,
        mover,
        moved_piece: None,
        captured_piece: None,
        prev_hands: board.hands,
        prev_king_squares: board.king_squares,
        prev_status: board.status,
        prev_zobrist_key: board.zobrist_key,
        prev_ply: board.ply,
    };

    match mv {
        Move::Board { from, to, promote } => {
            let Some(piece) = board.squares[from as usize] else {
                invariant_violation(board, mv, "no piece on origin square");
            };
            if piece.color != mover {
                invariant_violation(board, mv, "origin piece belongs to the opponent");
            }

            let captured = board.squares[to as usize];
            if let Some(target) = captured {
                if target.color == mover {
                    invariant_violation(board, mv, "destination holds an own piece");
                }
                board.zobrist_key ^= piece_square_key(target, to);
                capture_into_hand(board, target, mover, to);
            }

            let placed = if promote { piece.promoted() } else { piece };
            board.squares[from as usize] = None;
            board.squares[to as usize] = Some(placed);
            board.zobrist_key ^= piece_square_key(piece, from) ^ piece_square_key(placed, to);

            if piece.kind == PieceKind::King {
                board.king_squares[mover.index()] = Some(to);
            }

            record.moved_piece = Some(piece);
            record.captured_piece = captured;
        }
        Move::Drop { to, kind } => {
            let count = board.hands[mover.index()][kind.index()];
            if count == 0 {
                invariant_violation(board, mv, "dropped kind is not in hand");
            }
            if board.squares[to as usize].is_some() {
                invariant_violation(board, mv, "drop target is occupied");
            }

            set_hand_count(board, mover, kind, count - 1);
            let placed = Piece::new(kind.piece_kind(), mover);
            board.squares[to as usize] = Some(placed);
            board.zobrist_key ^= piece_square_key(placed, to);
        }
    }

    board.repetition_history.push(record.prev_zobrist_key);
    board.side_to_move = mover.opponent();
    board.zobrist_key ^= side_to_move_key();
    board.ply = board.ply.saturating_add(1);
    board.move_history.push(record);

    record
}

/// Undo the most recent `apply_move`. `record` must be the record it returned.
///
/// # Panics
/// If `record` is not the last entry of the board's move history.
pub fn revert_move(board: &mut BoardState, record: &MoveRecord) {
    match board.move_history.last() {
        Some(last) if last == record => {}
        _ => {
            error!(
                "revert of {} does not match the last applied move (history length {})",
                record.mv,
                board.move_history.len()
            );
            panic!("apply/revert nesting violated while reverting {}", record.mv);
        }
    }
    board.move_history.pop();
    board.repetition_history.pop();

    match record.mv {
        Move::Board { from, to, .. } => {
            board.squares[from as usize] = record.moved_piece;
            board.squares[to as usize] = record.captured_piece;
        }
        Move::Drop { to, .. } => {
            board.squares[to as usize] = None;
        }
    }

    board.hands = record.prev_hands;
    board.king_squares = record.prev_king_squares;
    board.status = record.prev_status;
    board.zobrist_key = record.prev_zobrist_key;
    board.side_to_move = record.mover;
    board.ply = record.prev_ply;
}

fn capture_into_hand(board: &mut BoardState, target: Piece, captor: Color, square: Square) {
    match target.kind.hand_kind() {
        Some(kind) => {
            let count = board.hands[captor.index()][kind.index()];
            set_hand_count(board, captor, kind, count.saturating_add(1));
        }
        None => {
            // Only reachable through unvalidated moves: the king was left en prise.
            board.king_squares[target.color.index()] = None;
            board.status = GameStatus::Finished {
                winner: Some(captor),
                reason: TerminationReason::IllegalMove,
            };
            debug!("king captured on square {square}; game over");
        }
    }
}

#[inline]
fn set_hand_count(board: &mut BoardState, color: Color, kind: HandKind, count: u8) {
    let old = board.hands[color.index()][kind.index()];
    board.zobrist_key ^= hand_count_key(color, kind, old) ^ hand_count_key(color, kind, count);
    board.hands[color.index()][kind.index()] = count;
}

#[cold]
fn invariant_violation(board: &BoardState, mv: Move, what: &str) -> ! {
    error!("cannot apply {mv} at ply {}: {what}", board.ply);
    panic!("board invariant violated applying {mv}: {what}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::zobrist::compute_zobrist_key;
    use crate::utils::usi_move::parse_usi_move;

    fn usi(text: &str) -> Move {
        parse_usi_move(text).expect("test move should parse")
    }

    #[test]
    fn apply_then_revert_restores_start_position() {
        let mut board = BoardState::new_game();
        let before = board.clone();

        let record = apply_move(&mut board, usi("7g7f"));
        assert_eq!(board.side_to_move, Color::White);
        assert_eq!(board.ply, 1);
        assert_eq!(board.move_history.len(), 1);
        assert_eq!(board.zobrist_key, compute_zobrist_key(&board));

        revert_move(&mut board, &record);
        assert_eq!(board, before);
    }

    #[test]
    fn capture_unpromotes_into_hand() {
        // Black dragon on 5e captures a white promoted silver on 5c.
        let mut board = BoardState::from_sfen("4k4/9/4+s4/9/4+R4/9/9/9/4K4 b - 1")
            .expect("test SFEN should parse");
        let before = board.clone();

        let record = apply_move(&mut board, usi("5e5c"));
        assert_eq!(record.captured_piece, Some(Piece::new(PieceKind::ProSilver, Color::White)));
        assert_eq!(board.hand_count(Color::Black, HandKind::Silver), 1);
        assert_eq!(
            board.piece_at(square_at(2, 4)),
            Some(Piece::new(PieceKind::Dragon, Color::Black))
        );
        assert_eq!(board.zobrist_key, compute_zobrist_key(&board));

        revert_move(&mut board, &record);
        assert_eq!(board, before);
    }

    #[test]
    fn promotion_and_drop_round_trip() {
        let mut board = BoardState::from_sfen("4k4/9/9/2P6/9/9/9/9/4K4 b S 1")
            .expect("test SFEN should parse");
        let before = board.clone();

        let promote = apply_move(&mut board, usi("7d7c+"));
        assert_eq!(
            board.piece_at(square_at(2, 2)),
            Some(Piece::new(PieceKind::ProPawn, Color::Black))
        );
        let king_step = apply_move(&mut board, usi("5a4a"));
        let drop = apply_move(&mut board, usi("S*5b"));
        assert_eq!(board.hand_count(Color::Black, HandKind::Silver), 0);
        assert_eq!(board.zobrist_key, compute_zobrist_key(&board));

        revert_move(&mut board, &drop);
        revert_move(&mut board, &king_step);
        revert_move(&mut board, &promote);
        assert_eq!(board, before);
    }

    #[test]
    fn capturing_a_king_ends_the_game() {
        // Not reachable through notation or validated play, so build it by hand.
        let mut board = BoardState::new_empty();
        board.squares[square_at(0, 4) as usize] = Some(Piece::new(PieceKind::King, Color::White));
        board.squares[square_at(1, 4) as usize] = Some(Piece::new(PieceKind::Rook, Color::Black));
        board.squares[square_at(8, 4) as usize] = Some(Piece::new(PieceKind::King, Color::Black));
        board.refresh_derived();
        let before = board.clone();

        let record = apply_move(&mut board, usi("5b5a"));
        assert!(board.is_over());
        assert_eq!(board.winner(), Some(Color::Black));
        assert_eq!(board.termination_reason(), Some(TerminationReason::IllegalMove));
        assert_eq!(board.king_square(Color::White), None);
        assert_eq!(board.hands[Color::Black.index()], [0; NUM_HAND_KINDS]);

        revert_move(&mut board, &record);
        assert_eq!(board, before);
    }

    #[test]
    fn revert_is_exact_at_saturated_ply() {
        let mut board = BoardState::from_sfen(
            "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 65536",
        )
        .expect("test SFEN should parse");
        assert_eq!(board.ply, u16::MAX);
        let before = board.clone();

        let record = apply_move(&mut board, usi("7g7f"));
        assert_eq!(board.ply, u16::MAX);
        let sfen = board.get_sfen();
        let reparsed = BoardState::from_sfen(&sfen).expect("saturated SFEN should parse");
        assert!(reparsed.same_position(&board), "{sfen}");

        revert_move(&mut board, &record);
        assert_eq!(board, before);
    }

    #[test]
    #[should_panic]
    fn reverting_out_of_order_panics() {
        let mut board = BoardState::new_game();
        let first = apply_move(&mut board, usi("7g7f"));
        let _second = apply_move(&mut board, usi("3c3d"));
        revert_move(&mut board, &first);
    }
}
