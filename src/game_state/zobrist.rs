//! Zobrist hashing support for fast position identity and repetition tracking.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs and builds. A position key covers the grid, both reserves and the side
//! to move; ply count and history are deliberately not part of it.

use std::sync::OnceLock;

use crate::game_state::shogi_rules::MAX_HAND_COUNTS;
use crate::game_state::shogi_types::*;

/// Largest reserve count any kind can reach (all eighteen pawns).
const MAX_HAND_COUNT: usize = 18;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; NUM_SQUARES]; NUM_PIECE_KINDS]; 2],
    hand_count: [[[u64; MAX_HAND_COUNT + 1]; NUM_HAND_KINDS]; 2],
    side_to_move: u64,
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[0u64; NUM_SQUARES]; NUM_PIECE_KINDS]; 2];
    for color in &mut piece_square {
        for kind in color {
            for sq in kind {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let mut hand_count = [[[0u64; MAX_HAND_COUNT + 1]; NUM_HAND_KINDS]; 2];
    for color in &mut hand_count {
        for kind in color {
            for count in kind {
                *count = next_random_u64(&mut seed);
            }
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    ZobristTables {
        piece_square,
        hand_count,
        side_to_move,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Key for a `(piece, square)` occupancy term.
#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square as usize]
}

/// Key for "`color` holds exactly `count` of `kind`".
#[inline]
pub fn hand_count_key(color: Color, kind: HandKind, count: u8) -> u64 {
    tables().hand_count[color.index()][kind.index()][(count as usize).min(MAX_HAND_COUNT)]
}

/// Side-to-move toggle key (xor in when white to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Compute the full position key from scratch.
pub fn compute_zobrist_key(board: &BoardState) -> u64 {
    let mut key = 0u64;

    for (sq, occupant) in board.squares.iter().enumerate() {
        if let Some(piece) = occupant {
            key ^= piece_square_key(*piece, sq as Square);
        }
    }

    for color in Color::ALL {
        for kind in ALL_HAND_KINDS {
            key ^= hand_count_key(color, kind, board.hands[color.index()][kind.index()]);
        }
    }

    if board.side_to_move == Color::White {
        key ^= side_to_move_key();
    }

    key
}
