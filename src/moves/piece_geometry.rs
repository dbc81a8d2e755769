//! Per-kind movement geometry.
//!
//! Each kind is described by two 8-bit direction masks (single steps and
//! unbounded slides) over `DIRECTIONS`, plus the knight jump handled
//! separately. Tables are written from Black's point of view; White's masks
//! are the bit-reversed mirror, because direction `i` and `7 - i` are exact
//! opposites.

use crate::game_state::shogi_types::*;

/// `(dr, dc)` per direction index. Row 0 is Black's far side.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const UP_LEFT: u8 = 1 << 0;
const UP: u8 = 1 << 1;
const UP_RIGHT: u8 = 1 << 2;
const LEFT: u8 = 1 << 3;
const RIGHT: u8 = 1 << 4;
const DOWN_LEFT: u8 = 1 << 5;
const DOWN: u8 = 1 << 6;
const DOWN_RIGHT: u8 = 1 << 7;

const ORTHOGONAL: u8 = UP | LEFT | RIGHT | DOWN;
const DIAGONAL: u8 = UP_LEFT | UP_RIGHT | DOWN_LEFT | DOWN_RIGHT;
const GOLD_STEPS: u8 = UP_LEFT | UP | UP_RIGHT | LEFT | RIGHT | DOWN;
const SILVER_STEPS: u8 = UP_LEFT | UP | UP_RIGHT | DOWN_LEFT | DOWN_RIGHT;

// Indexed by `PieceKind::index()`, Black orientation.
const BLACK_STEPS: [u8; NUM_PIECE_KINDS] = [
    UP,               // Pawn
    0,                // Lance
    0,                // Knight
    SILVER_STEPS,     // Silver
    GOLD_STEPS,       // Gold
    0,                // Bishop
    0,                // Rook
    ORTHOGONAL | DIAGONAL, // King
    GOLD_STEPS,       // ProPawn
    GOLD_STEPS,       // ProLance
    GOLD_STEPS,       // ProKnight
    GOLD_STEPS,       // ProSilver
    ORTHOGONAL,       // Horse
    DIAGONAL,         // Dragon
];

const BLACK_SLIDES: [u8; NUM_PIECE_KINDS] = [
    0,          // Pawn
    UP,         // Lance
    0,          // Knight
    0,          // Silver
    0,          // Gold
    DIAGONAL,   // Bishop
    ORTHOGONAL, // Rook
    0,          // King
    0,          // ProPawn
    0,          // ProLance
    0,          // ProKnight
    0,          // ProSilver
    DIAGONAL,   // Horse
    ORTHOGONAL, // Dragon
];

pub const STEP_MASKS: [[u8; NUM_PIECE_KINDS]; 2] = mirror_for_white(BLACK_STEPS);
pub const SLIDE_MASKS: [[u8; NUM_PIECE_KINDS]; 2] = mirror_for_white(BLACK_SLIDES);

const fn mirror_for_white(black: [u8; NUM_PIECE_KINDS]) -> [[u8; NUM_PIECE_KINDS]; 2] {
    let mut white = [0u8; NUM_PIECE_KINDS];
    let mut i = 0usize;
    while i < NUM_PIECE_KINDS {
        white[i] = black[i].reverse_bits();
        i += 1;
    }
    [black, white]
}

#[inline]
pub const fn step_mask(piece: Piece) -> u8 {
    STEP_MASKS[piece.color.index()][piece.kind.index()]
}

#[inline]
pub const fn slide_mask(piece: Piece) -> u8 {
    SLIDE_MASKS[piece.color.index()][piece.kind.index()]
}

/// Index of the direction opposite to `dir`.
#[inline]
pub const fn opposite_direction(dir: usize) -> usize {
    7 - dir
}

/// The two knight jump offsets for `color`.
#[inline]
pub const fn knight_offsets(color: Color) -> [(i8, i8); 2] {
    let dr = 2 * color.forward();
    [(dr, -1), (dr, 1)]
}

/// Squares reachable by a single step or jump of `piece` from `from`,
/// ignoring occupancy. Sliding reach is not included.
pub fn step_targets(piece: Piece, from: Square) -> impl Iterator<Item = Square> {
    let steps = step_mask(piece);
    let knight = piece.kind == PieceKind::Knight;
    let jumps = knight_offsets(piece.color);
    (0..DIRECTIONS.len())
        .filter(move |dir| steps & (1u8 << dir) != 0)
        .filter_map(move |dir| {
            let (dr, dc) = DIRECTIONS[dir];
            offset_square(from, dr, dc)
        })
        .chain(
            jumps
                .into_iter()
                .filter(move |_| knight)
                .filter_map(move |(dr, dc)| offset_square(from, dr, dc)),
        )
}
