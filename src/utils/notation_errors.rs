//! Parse errors for SFEN positions and USI moves.
//!
//! Every variant says where parsing stopped so a bad checkpoint or log line
//! can be diagnosed without re-running the parser by hand.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("SFEN is missing the {field} field")]
    MissingField { field: &'static str },

    #[error("SFEN has unexpected trailing field '{extra}'")]
    TrailingField { extra: String },

    #[error("SFEN board rank {rank} (row {row}): {message}")]
    Board {
        rank: char,
        row: usize,
        message: String,
    },

    #[error("SFEN side-to-move field '{value}' must be 'b' or 'w'")]
    SideToMove { value: String },

    #[error("SFEN hand field at byte {offset}: {message}")]
    Hand { offset: usize, message: String },

    #[error("SFEN move number '{value}' must be a positive integer")]
    MoveNumber { value: String },

    #[error("SFEN position is inconsistent: {message}")]
    Inconsistent { message: String },

    #[error("invalid square '{text}': {message}")]
    Square { text: String, message: String },

    #[error("invalid USI move '{text}' at byte {offset}: {message}")]
    Move {
        text: String,
        offset: usize,
        message: String,
    },

    #[error("USI position command at token {token}: {message}")]
    Command { token: usize, message: String },
}
