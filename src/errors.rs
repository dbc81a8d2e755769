//! Error type returned by the game loop facade.

use thiserror::Error;

use crate::action_space::codec::CodecError;
use crate::game_state::shogi_types::Move;
use crate::move_generation::legal_move_validation::IllegalMoveKind;
use crate::utils::notation_errors::NotationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShogiError {
    /// A move was rejected; the position is unchanged.
    #[error("illegal move {mv}: {kind}")]
    IllegalMove { mv: Move, kind: IllegalMoveKind },

    /// A recorded move at whitespace token `token` of a game record is illegal.
    #[error("illegal move {mv} at token {token}: {kind}")]
    IllegalRecordMove {
        token: usize,
        mv: Move,
        kind: IllegalMoveKind,
    },

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

pub type ShogiResult<T> = Result<T, ShogiError>;
