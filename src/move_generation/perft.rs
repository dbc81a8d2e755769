use std::thread;

use thiserror::Error;

use crate::game_state::{game_state::BoardState, shogi_types::*};
use crate::move_generation::legal_move_apply::{apply_move, revert_move};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_any_legal_move};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub promotions: usize,
    pub drops: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
        self.drops += rhs.drops;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

#[derive(Debug, Error)]
pub enum PerftError {
    #[error("perft worker thread panicked")]
    WorkerPanicked,
}

/// Count leaf nodes `depth` plies below `board`, classifying the last move of
/// each path. The board is restored before returning.
pub fn perft(board: &mut BoardState, depth: u8) -> PerftCounts {
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return total;
    }

    for mv in generate_legal_moves(board) {
        perft_recurse(board, mv, depth, 1, &mut total);
    }
    total
}

/// Same as `perft`, with one worker thread per root move.
pub fn perft_multi_threaded(board: &BoardState, depth: u8) -> Result<PerftCounts, PerftError> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut root = board.clone();
    let root_moves = generate_legal_moves(&mut root);
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let mut local_board = root.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            perft_recurse(&mut local_board, mv, depth, 1, &mut local);
            local
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle.join().map_err(|_| PerftError::WorkerPanicked)?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse(
    board: &mut BoardState,
    mv: Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    let record = apply_move(board, mv);

    if current_depth == search_depth {
        counts.nodes += 1;

        if record.captured_piece.is_some() {
            counts.captures += 1;
        }
        if matches!(mv, Move::Board { promote: true, .. }) {
            counts.promotions += 1;
        }
        if mv.is_drop() {
            counts.drops += 1;
        }
        if is_in_check(board, board.side_to_move) {
            counts.checks += 1;
            if !has_any_legal_move(board) {
                counts.checkmates += 1;
            }
        }
    } else {
        for child in generate_legal_moves(board) {
            perft_recurse(board, child, search_depth, current_depth + 1, counts);
        }
    }

    revert_move(board, &record);
}
