use crate::game_state::game_status::GameStatus;
use crate::game_state::shogi_types::*;

/// Single reversible record for `apply_move` / `revert_move`.
///
/// Holds everything `apply_move` overwrites, so reverting never needs a
/// copy of the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub mover: Color,
    /// The piece as it stood on the origin square (before any promotion).
    /// `None` for drops.
    pub moved_piece: Option<Piece>,
    /// The occupant of the destination square, in its on-board form.
    pub captured_piece: Option<Piece>,

    pub prev_hands: [[u8; NUM_HAND_KINDS]; 2],
    pub prev_king_squares: [Option<Square>; 2],
    pub prev_status: GameStatus,
    pub prev_zobrist_key: u64,
    pub prev_ply: u16,
}
