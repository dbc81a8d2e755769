//! Fixed action space shared with an external policy.
//!
//! Enumeration order, frozen:
//! 1. Board moves. For each origin `0..81` and destination `0..81` (row-major,
//!    destination inner) with the destination on a rank, file or diagonal line
//!    through the origin, or a knight-shaped `(±2, ±1)` offset: first the
//!    non-promoting action, then the promoting one when origin or destination
//!    lies in either side's promotion zone (rows 0..=2 or 6..=8).
//! 2. Drops. Kinds in order P, L, N, S, G, B, R, each followed by all 81
//!    destinations.
//!
//! Both directions are table lookups built once on first use.

use std::sync::OnceLock;

use log::error;
use thiserror::Error;

use crate::game_state::shogi_rules::PROMOTION_ZONE_DEPTH;
use crate::game_state::{game_state::BoardState, shogi_types::*};
use crate::move_generation::legal_move_generator::generate_legal_moves;

pub const NUM_BOARD_ACTIONS: usize = 4278;
pub const NUM_DROP_ACTIONS: usize = NUM_HAND_KINDS * NUM_SQUARES;
/// Size of the action space.
pub const NUM_ACTIONS: usize = NUM_BOARD_ACTIONS + NUM_DROP_ACTIONS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("action index {index} is outside 0..{NUM_ACTIONS}")]
    IndexOutOfRange { index: usize },
    #[error("move {mv} has no action index")]
    NotEncodable { mv: Move },
    #[error("legal move {mv} has no action index")]
    MissingLegalIndex { mv: Move },
}

struct ActionSpace {
    moves: Vec<Move>,
    // [(from * 81 + to) * 2 + promote]
    board_index: Vec<Option<u16>>,
}

static ACTION_SPACE: OnceLock<ActionSpace> = OnceLock::new();

#[inline]
fn action_space() -> &'static ActionSpace {
    ACTION_SPACE.get_or_init(build_action_space)
}

fn build_action_space() -> ActionSpace {
    let mut moves = Vec::with_capacity(NUM_ACTIONS);
    let mut board_index = vec![None; NUM_SQUARES * NUM_SQUARES * 2];

    for from in 0..NUM_SQUARES as Square {
        for to in 0..NUM_SQUARES as Square {
            if !is_geometric_pair(from, to) {
                continue;
            }
            for promote in [false, true] {
                if promote && !touches_any_zone(from, to) {
                    continue;
                }
                board_index[board_slot(from, to, promote)] = Some(moves.len() as u16);
                moves.push(Move::Board { from, to, promote });
            }
        }
    }

    for kind in ALL_HAND_KINDS {
        for to in 0..NUM_SQUARES as Square {
            moves.push(Move::Drop { to, kind });
        }
    }

    ActionSpace { moves, board_index }
}

#[inline]
fn board_slot(from: Square, to: Square, promote: bool) -> usize {
    (from as usize * NUM_SQUARES + to as usize) * 2 + promote as usize
}

fn is_geometric_pair(from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let dr = square_row(to) as i8 - square_row(from) as i8;
    let dc = square_col(to) as i8 - square_col(from) as i8;
    dr == 0 || dc == 0 || dr.abs() == dc.abs() || (dr.abs() == 2 && dc.abs() == 1)
}

fn in_any_zone(square: Square) -> bool {
    let row = square_row(square);
    row < PROMOTION_ZONE_DEPTH || row >= BOARD_SIZE as u8 - PROMOTION_ZONE_DEPTH
}

#[inline]
fn touches_any_zone(from: Square, to: Square) -> bool {
    in_any_zone(from) || in_any_zone(to)
}

/// Action index of `mv`.
pub fn index_of(mv: Move) -> Result<usize, CodecError> {
    match mv {
        Move::Board { from, to, promote } => {
            if from as usize >= NUM_SQUARES || to as usize >= NUM_SQUARES {
                return Err(CodecError::NotEncodable { mv });
            }
            action_space().board_index[board_slot(from, to, promote)]
                .map(usize::from)
                .ok_or(CodecError::NotEncodable { mv })
        }
        Move::Drop { to, kind } => {
            if to as usize >= NUM_SQUARES {
                return Err(CodecError::NotEncodable { mv });
            }
            Ok(NUM_BOARD_ACTIONS + kind.index() * NUM_SQUARES + to as usize)
        }
    }
}

/// Move encoded by `index`.
pub fn move_of(index: usize) -> Result<Move, CodecError> {
    action_space()
        .moves
        .get(index)
        .copied()
        .ok_or(CodecError::IndexOutOfRange { index })
}

/// One flag per action, set for each legal move of the side to move.
///
/// A legal move outside the action space means the codec and the rules
/// disagree; it is reported as `MissingLegalIndex` and logged.
pub fn legal_mask(board: &mut BoardState) -> Result<Vec<bool>, CodecError> {
    let mut mask = vec![false; NUM_ACTIONS];
    for mv in generate_legal_moves(board) {
        let index = index_of(mv).map_err(|_| {
            error!("legal move {mv} is missing from the action space");
            CodecError::MissingLegalIndex { mv }
        })?;
        mask[index] = true;
    }
    Ok(mask)
}

/// Indices of the legal moves, in generation order.
pub fn legal_action_indices(board: &mut BoardState) -> Result<Vec<usize>, CodecError> {
    generate_legal_moves(board)
        .into_iter()
        .map(|mv| {
            index_of(mv).map_err(|_| {
                error!("legal move {mv} is missing from the action space");
                CodecError::MissingLegalIndex { mv }
            })
        })
        .collect()
}
