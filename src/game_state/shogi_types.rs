//! Core value types for the shogi board model.
//!
//! Colors, piece kinds (base and promoted), pieces, squares and the two move
//! shapes. Everything here is `Copy` and carries no board context.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::game_state::game_state::BoardState;
pub use crate::game_state::undo_state::MoveRecord;

pub const BOARD_SIZE: usize = 9;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
pub const NUM_PIECE_KINDS: usize = 14;
pub const NUM_HAND_KINDS: usize = 7;

/// Board square index (`0..81`, `row * 9 + col`, row 0 is the top rank).
pub type Square = u8;

#[inline]
pub const fn square_at(row: u8, col: u8) -> Square {
    row * BOARD_SIZE as u8 + col
}

#[inline]
pub const fn square_row(square: Square) -> u8 {
    square / BOARD_SIZE as u8
}

#[inline]
pub const fn square_col(square: Square) -> u8 {
    square % BOARD_SIZE as u8
}

/// Offset a square by `(dr, dc)`, returning `None` when it leaves the board.
#[inline]
pub const fn offset_square(square: Square, dr: i8, dc: i8) -> Option<Square> {
    let row = square_row(square) as i8 + dr;
    let col = square_col(square) as i8 + dc;
    if row < 0 || row >= BOARD_SIZE as i8 || col < 0 || col >= BOARD_SIZE as i8 {
        None
    } else {
        Some(square_at(row as u8, col as u8))
    }
}

/// Side to move. Black (sente) moves first and advances toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Row delta of one step "forward" for this color.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Black => -1,
            Color::White => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// All fourteen piece kinds. The first eight are base kinds, the last six are
/// the promoted forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
    King,
    ProPawn,
    ProLance,
    ProKnight,
    ProSilver,
    Horse,
    Dragon,
}

pub const ALL_PIECE_KINDS: [PieceKind; NUM_PIECE_KINDS] = [
    PieceKind::Pawn,
    PieceKind::Lance,
    PieceKind::Knight,
    PieceKind::Silver,
    PieceKind::Gold,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::King,
    PieceKind::ProPawn,
    PieceKind::ProLance,
    PieceKind::ProKnight,
    PieceKind::ProSilver,
    PieceKind::Horse,
    PieceKind::Dragon,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_promoted(self) -> bool {
        matches!(
            self,
            PieceKind::ProPawn
                | PieceKind::ProLance
                | PieceKind::ProKnight
                | PieceKind::ProSilver
                | PieceKind::Horse
                | PieceKind::Dragon
        )
    }

    #[inline]
    pub const fn is_promotable(self) -> bool {
        matches!(
            self,
            PieceKind::Pawn
                | PieceKind::Lance
                | PieceKind::Knight
                | PieceKind::Silver
                | PieceKind::Bishop
                | PieceKind::Rook
        )
    }

    /// Base -> promoted. Kinds without a promoted form map to themselves.
    #[inline]
    pub const fn promote(self) -> Self {
        match self {
            PieceKind::Pawn => PieceKind::ProPawn,
            PieceKind::Lance => PieceKind::ProLance,
            PieceKind::Knight => PieceKind::ProKnight,
            PieceKind::Silver => PieceKind::ProSilver,
            PieceKind::Bishop => PieceKind::Horse,
            PieceKind::Rook => PieceKind::Dragon,
            other => other,
        }
    }

    /// Promoted -> base. Unpromoted kinds map to themselves.
    #[inline]
    pub const fn unpromote(self) -> Self {
        match self {
            PieceKind::ProPawn => PieceKind::Pawn,
            PieceKind::ProLance => PieceKind::Lance,
            PieceKind::ProKnight => PieceKind::Knight,
            PieceKind::ProSilver => PieceKind::Silver,
            PieceKind::Horse => PieceKind::Bishop,
            PieceKind::Dragon => PieceKind::Rook,
            other => other,
        }
    }

    /// The reserve kind this piece turns into when captured, if any.
    #[inline]
    pub const fn hand_kind(self) -> Option<HandKind> {
        HandKind::from_piece_kind(self.unpromote())
    }
}

/// The seven kinds that can sit in a reserve and be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandKind {
    Pawn,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
}

pub const ALL_HAND_KINDS: [HandKind; NUM_HAND_KINDS] = [
    HandKind::Pawn,
    HandKind::Lance,
    HandKind::Knight,
    HandKind::Silver,
    HandKind::Gold,
    HandKind::Bishop,
    HandKind::Rook,
];

impl HandKind {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            HandKind::Pawn => PieceKind::Pawn,
            HandKind::Lance => PieceKind::Lance,
            HandKind::Knight => PieceKind::Knight,
            HandKind::Silver => PieceKind::Silver,
            HandKind::Gold => PieceKind::Gold,
            HandKind::Bishop => PieceKind::Bishop,
            HandKind::Rook => PieceKind::Rook,
        }
    }

    /// Only unpromoted, non-king kinds are holdable.
    #[inline]
    pub const fn from_piece_kind(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::Pawn => Some(HandKind::Pawn),
            PieceKind::Lance => Some(HandKind::Lance),
            PieceKind::Knight => Some(HandKind::Knight),
            PieceKind::Silver => Some(HandKind::Silver),
            PieceKind::Gold => Some(HandKind::Gold),
            PieceKind::Bishop => Some(HandKind::Bishop),
            PieceKind::Rook => Some(HandKind::Rook),
            _ => None,
        }
    }

    /// Single uppercase letter used by drop notation (`P*5e`).
    #[inline]
    pub const fn drop_code(self) -> char {
        match self {
            HandKind::Pawn => 'P',
            HandKind::Lance => 'L',
            HandKind::Knight => 'N',
            HandKind::Silver => 'S',
            HandKind::Gold => 'G',
            HandKind::Bishop => 'B',
            HandKind::Rook => 'R',
        }
    }

    #[inline]
    pub const fn from_drop_code(code: char) -> Option<Self> {
        match code {
            'P' => Some(HandKind::Pawn),
            'L' => Some(HandKind::Lance),
            'N' => Some(HandKind::Knight),
            'S' => Some(HandKind::Silver),
            'G' => Some(HandKind::Gold),
            'B' => Some(HandKind::Bishop),
            'R' => Some(HandKind::Rook),
            _ => None,
        }
    }
}

/// A piece on the board. Promotion state lives in `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    #[inline]
    pub const fn is_promoted(self) -> bool {
        self.kind.is_promoted()
    }

    #[inline]
    pub const fn promoted(self) -> Self {
        Self::new(self.kind.promote(), self.color)
    }

    #[inline]
    pub const fn unpromoted(self) -> Self {
        Self::new(self.kind.unpromote(), self.color)
    }
}

/// A move is either a piece relocation on the board or a drop from the reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Board {
        from: Square,
        to: Square,
        promote: bool,
    },
    Drop {
        to: Square,
        kind: HandKind,
    },
}

impl Move {
    pub const fn board(from_row: u8, from_col: u8, to_row: u8, to_col: u8, promote: bool) -> Self {
        Move::Board {
            from: square_at(from_row, from_col),
            to: square_at(to_row, to_col),
            promote,
        }
    }

    pub const fn drop(to_row: u8, to_col: u8, kind: HandKind) -> Self {
        Move::Drop {
            to: square_at(to_row, to_col),
            kind,
        }
    }

    #[inline]
    pub const fn to(self) -> Square {
        match self {
            Move::Board { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    #[inline]
    pub const fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::utils::usi_move::move_to_usi(*self))
    }
}
