//! Pseudo-legal board moves for the side to move.
//!
//! Geometry and promotion options only; king safety is filtered later by the
//! legal move generator.

use crate::game_state::{game_state::BoardState, shogi_types::*};
use crate::move_generation::legal_move_shared::{for_each_target, push_board_move_variants};

pub fn generate_board_moves(board: &BoardState, out: &mut Vec<Move>) {
    let side = board.side_to_move;

    for (sq, occupant) in board.squares.iter().enumerate() {
        let Some(piece) = *occupant else {
            continue;
        };
        if piece.color != side {
            continue;
        }

        let from = sq as Square;
        for_each_target(board, from, piece, |to| {
            push_board_move_variants(piece, from, to, out);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_stops_at_first_blocker() {
        // Black rook 5e, white pawn 5c, own pawn 3e.
        let board = BoardState::from_sfen("k8/9/4p4/9/4R1P2/9/9/9/8K b - 1")
            .expect("test SFEN should parse");
        let mut moves = Vec::new();
        generate_board_moves(&board, &mut moves);

        let from = square_at(4, 4);
        let rook_targets: Vec<(Square, bool)> = moves
            .iter()
            .filter_map(|mv| match *mv {
                Move::Board { from: f, to, promote } if f == from => Some((to, promote)),
                _ => None,
            })
            .collect();

        assert!(rook_targets.contains(&(square_at(3, 4), false)));
        // Capture into the zone may promote.
        assert!(rook_targets.contains(&(square_at(2, 4), false)));
        assert!(rook_targets.contains(&(square_at(2, 4), true)));
        assert!(!rook_targets.iter().any(|(to, _)| *to == square_at(1, 4)));
        assert!(rook_targets.contains(&(square_at(4, 5), false)));
        assert!(!rook_targets.iter().any(|(to, _)| *to == square_at(4, 6)));
        assert!(!rook_targets.iter().any(|(to, _)| *to == square_at(4, 7)));
        // up: 5d, 5c, 5c+; down 4; left 4; right 1
        assert_eq!(rook_targets.len(), 3 + 4 + 4 + 1);
    }

    #[test]
    fn pawn_reaching_last_rank_must_promote() {
        let board = BoardState::from_sfen("k8/4P4/9/9/9/9/9/9/8K b - 1")
            .expect("test SFEN should parse");
        let mut moves = Vec::new();
        generate_board_moves(&board, &mut moves);

        let pawn_moves: Vec<&Move> = moves
            .iter()
            .filter(|mv| matches!(mv, Move::Board { from, .. } if *from == square_at(1, 4)))
            .collect();
        assert_eq!(
            pawn_moves,
            vec![&Move::Board {
                from: square_at(1, 4),
                to: square_at(0, 4),
                promote: true
            }]
        );
    }
}
