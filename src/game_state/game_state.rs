//! Mutable shogi position.
//!
//! `BoardState` stores the grid, both reserves, side to move, ply counter,
//! terminal flags and the reversible move history consumed by
//! `apply_move` / `revert_move`. The king squares and Zobrist key are derived
//! caches kept in sync by the executor.

use std::fmt;

use crate::game_state::game_status::{GameStatus, TerminationReason};
use crate::game_state::shogi_rules::STARTING_POSITION_SFEN;
use crate::game_state::shogi_types::*;
use crate::game_state::undo_state::MoveRecord;
use crate::game_state::zobrist::compute_zobrist_key;
use crate::utils::notation_errors::NotationError;
use crate::utils::render_game_state::render_game_state;
use crate::utils::sfen_generator::generate_sfen;
use crate::utils::sfen_parser::parse_sfen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    // [row * 9 + col]
    pub squares: [Option<Piece>; NUM_SQUARES],
    // [color][hand_kind]
    pub hands: [[u8; NUM_HAND_KINDS]; 2],

    pub side_to_move: Color,
    pub ply: u16,

    // --- Derived caches ---
    pub king_squares: [Option<Square>; 2],
    pub zobrist_key: u64,

    // --- Repetition / undo support ---
    /// Keys of every earlier position, one per applied move.
    pub repetition_history: Vec<u64>,
    pub move_history: Vec<MoveRecord>,

    pub status: GameStatus,
}

impl Default for BoardState {
    fn default() -> Self {
        let mut board = Self {
            squares: [None; NUM_SQUARES],
            hands: [[0; NUM_HAND_KINDS]; 2],
            side_to_move: Color::Black,
            ply: 0,
            king_squares: [None; 2],
            zobrist_key: 0,
            repetition_history: Vec::new(),
            move_history: Vec::new(),
            status: GameStatus::Ongoing,
        };
        board.zobrist_key = compute_zobrist_key(&board);
        board
    }
}

impl BoardState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// The standard starting position.
    pub fn new_game() -> Self {
        let mut board = Self::new_empty();
        for (row, rank) in START_LAYOUT.iter().enumerate() {
            for (col, entry) in rank.iter().enumerate() {
                if let Some((kind, color)) = entry {
                    board.squares[square_at(row as u8, col as u8) as usize] =
                        Some(Piece::new(*kind, *color));
                }
            }
        }
        board.refresh_derived();
        board
    }

    #[inline]
    pub fn from_sfen(sfen: &str) -> Result<Self, NotationError> {
        parse_sfen(sfen)
    }

    #[inline]
    pub fn get_sfen(&self) -> String {
        generate_sfen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    #[inline]
    pub fn piece_at_rc(&self, row: u8, col: u8) -> Option<Piece> {
        self.piece_at(square_at(row, col))
    }

    #[inline]
    pub fn hand_count(&self, color: Color, kind: HandKind) -> u8 {
        self.hands[color.index()][kind.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.status.winner()
    }

    #[inline]
    pub fn termination_reason(&self) -> Option<TerminationReason> {
        self.status.reason()
    }

    /// How many times the current position has occurred, including now.
    pub fn repetition_count(&self) -> usize {
        1 + self
            .repetition_history
            .iter()
            .filter(|key| **key == self.zobrist_key)
            .count()
    }

    /// Grid, reserves, side to move and ply match. History and terminal flags
    /// are ignored, which is exactly what position notation carries.
    pub fn same_position(&self, other: &BoardState) -> bool {
        self.squares == other.squares
            && self.hands == other.hands
            && self.side_to_move == other.side_to_move
            && self.ply == other.ply
    }

    /// Recompute king squares and the Zobrist key after direct grid edits.
    pub fn refresh_derived(&mut self) {
        self.king_squares = [None; 2];
        for (sq, occupant) in self.squares.iter().enumerate() {
            if let Some(Piece {
                kind: PieceKind::King,
                color,
            }) = occupant
            {
                self.king_squares[color.index()] = Some(sq as Square);
            }
        }
        self.zobrist_key = compute_zobrist_key(self);
    }

    /// Number of kings of `color` on the grid.
    pub fn king_count(&self, color: Color) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|p| p.kind == PieceKind::King && p.color == color)
            .count()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_game_state(self))
    }
}

type LayoutEntry = Option<(PieceKind, Color)>;

const fn back_rank(color: Color) -> [LayoutEntry; BOARD_SIZE] {
    [
        Some((PieceKind::Lance, color)),
        Some((PieceKind::Knight, color)),
        Some((PieceKind::Silver, color)),
        Some((PieceKind::Gold, color)),
        Some((PieceKind::King, color)),
        Some((PieceKind::Gold, color)),
        Some((PieceKind::Silver, color)),
        Some((PieceKind::Knight, color)),
        Some((PieceKind::Lance, color)),
    ]
}

const fn pawn_rank(color: Color) -> [LayoutEntry; BOARD_SIZE] {
    [Some((PieceKind::Pawn, color)); BOARD_SIZE]
}

const EMPTY_RANK: [LayoutEntry; BOARD_SIZE] = [None; BOARD_SIZE];

const START_LAYOUT: [[LayoutEntry; BOARD_SIZE]; BOARD_SIZE] = [
    back_rank(Color::White),
    [
        None,
        Some((PieceKind::Rook, Color::White)),
        None,
        None,
        None,
        None,
        None,
        Some((PieceKind::Bishop, Color::White)),
        None,
    ],
    pawn_rank(Color::White),
    EMPTY_RANK,
    EMPTY_RANK,
    EMPTY_RANK,
    pawn_rank(Color::Black),
    [
        None,
        Some((PieceKind::Bishop, Color::Black)),
        None,
        None,
        None,
        None,
        None,
        Some((PieceKind::Rook, Color::Black)),
        None,
    ],
    back_rank(Color::Black),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_matches_starting_sfen() {
        let built = BoardState::new_game();
        let parsed = BoardState::from_sfen(STARTING_POSITION_SFEN).expect("start SFEN should parse");
        assert_eq!(built, parsed);
        assert_eq!(built.get_sfen(), STARTING_POSITION_SFEN);
    }

    #[test]
    fn new_game_has_one_king_each() {
        let board = BoardState::new_game();
        assert_eq!(board.king_count(Color::Black), 1);
        assert_eq!(board.king_count(Color::White), 1);
        assert_eq!(board.king_square(Color::Black), Some(square_at(8, 4)));
        assert_eq!(board.king_square(Color::White), Some(square_at(0, 4)));
        assert_eq!(board.repetition_count(), 1);
        assert!(!board.is_over());
    }
}
