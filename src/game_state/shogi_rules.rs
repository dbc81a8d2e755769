//! Canonical shogi rule constants and rank-range tables.
//!
//! Promotion eligibility, compulsory promotion and drop restrictions are all
//! expressed through relative ranks (distance from the far edge for the given
//! color) looked up in the tables below.

use crate::game_state::shogi_types::*;

/// Standard starting position in SFEN.
pub const STARTING_POSITION_SFEN: &str =
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// Number of far ranks forming the promotion zone.
pub const PROMOTION_ZONE_DEPTH: u8 = 3;

/// Far ranks on which an unpromoted piece of this kind would have no further
/// move. It must promote on arrival and may not be dropped there.
pub const DEAD_RANK_DEPTH: [u8; NUM_PIECE_KINDS] = [
    1, // Pawn
    1, // Lance
    2, // Knight
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Total number of each hand kind in a full set (board + both reserves).
pub const MAX_HAND_COUNTS: [u8; NUM_HAND_KINDS] = [18, 4, 4, 4, 4, 2, 2];

/// Distance of `square` from the far edge as seen by `color` (0 = last rank).
#[inline]
pub const fn relative_rank(color: Color, square: Square) -> u8 {
    let row = square_row(square);
    match color {
        Color::Black => row,
        Color::White => (BOARD_SIZE as u8 - 1) - row,
    }
}

#[inline]
pub const fn in_promotion_zone(color: Color, square: Square) -> bool {
    relative_rank(color, square) < PROMOTION_ZONE_DEPTH
}

/// Whether a piece of `kind` moving `from -> to` may promote.
#[inline]
pub const fn can_promote(kind: PieceKind, color: Color, from: Square, to: Square) -> bool {
    kind.is_promotable() && (in_promotion_zone(color, from) || in_promotion_zone(color, to))
}

/// Whether a piece of `kind` arriving on `to` has to promote.
#[inline]
pub const fn must_promote(kind: PieceKind, color: Color, to: Square) -> bool {
    relative_rank(color, to) < DEAD_RANK_DEPTH[kind.index()]
}

/// Whether an unpromoted piece of `kind` has any move left standing on `square`.
#[inline]
pub const fn has_future_move(kind: PieceKind, color: Color, square: Square) -> bool {
    relative_rank(color, square) >= DEAD_RANK_DEPTH[kind.index()]
}
