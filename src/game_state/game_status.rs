//! Terminal flags carried by a `BoardState`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::shogi_types::Color;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    Checkmate,
    Stalemate,
    Repetition,
    Resignation,
    MoveLimit,
    IllegalMove,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerminationReason::Checkmate => "checkmate",
            TerminationReason::Stalemate => "stalemate",
            TerminationReason::Repetition => "repetition",
            TerminationReason::Resignation => "resignation",
            TerminationReason::MoveLimit => "move limit",
            TerminationReason::IllegalMove => "illegal move",
        };
        f.write_str(name)
    }
}

/// Ongoing, or finished with an optional winner (`None` is a draw).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Finished {
        winner: Option<Color>,
        reason: TerminationReason,
    },
}

impl GameStatus {
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::Finished { .. })
    }

    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Finished { winner, .. } => winner,
            GameStatus::Ongoing => None,
        }
    }

    #[inline]
    pub const fn reason(self) -> Option<TerminationReason> {
        match self {
            GameStatus::Finished { reason, .. } => Some(reason),
            GameStatus::Ongoing => None,
        }
    }
}
