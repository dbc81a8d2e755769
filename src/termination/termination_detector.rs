//! Post-move game-end detection.
//!
//! Evaluated once per ply after `apply_move`. Checks run in a fixed order:
//! no legal reply (checkmate or stalemate), then repetition, then the move
//! limit. A finished status is absorbing; nothing here reopens a game.

use log::debug;

use crate::game::game_config::{RulesConfig, StalematePolicy};
use crate::game_state::game_state::BoardState;
use crate::game_state::game_status::{GameStatus, TerminationReason};
use crate::game_state::shogi_types::Color;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

/// Classify the position without modifying the stored status.
pub fn evaluate_termination(board: &mut BoardState, config: &RulesConfig) -> GameStatus {
    if board.is_over() {
        return board.status;
    }

    let to_move = board.side_to_move;
    if !has_any_legal_move(board) {
        if is_in_check(board, to_move) {
            return GameStatus::Finished {
                winner: Some(to_move.opponent()),
                reason: TerminationReason::Checkmate,
            };
        }
        let winner = match config.stalemate_policy {
            StalematePolicy::Draw => None,
            StalematePolicy::LossForStalemated => Some(to_move.opponent()),
        };
        return GameStatus::Finished {
            winner,
            reason: TerminationReason::Stalemate,
        };
    }

    if board.repetition_count() >= config.repetition_threshold {
        return GameStatus::Finished {
            winner: None,
            reason: TerminationReason::Repetition,
        };
    }

    if board.ply >= config.max_plies {
        return GameStatus::Finished {
            winner: None,
            reason: TerminationReason::MoveLimit,
        };
    }

    GameStatus::Ongoing
}

/// Evaluate and store the result on the board.
pub fn update_termination(board: &mut BoardState, config: &RulesConfig) -> GameStatus {
    let status = evaluate_termination(board, config);
    if status != board.status {
        log_transition(board, status);
        board.status = status;
    }
    status
}

/// End the game by resignation of `color`. No effect once the game is over.
pub fn resign(board: &mut BoardState, color: Color) -> GameStatus {
    finish_externally(board, color, TerminationReason::Resignation)
}

/// End the game against `offender` for attempting an illegal move.
pub fn forfeit_illegal_move(board: &mut BoardState, offender: Color) -> GameStatus {
    finish_externally(board, offender, TerminationReason::IllegalMove)
}

fn finish_externally(board: &mut BoardState, loser: Color, reason: TerminationReason) -> GameStatus {
    if board.is_over() {
        return board.status;
    }
    let status = GameStatus::Finished {
        winner: Some(loser.opponent()),
        reason,
    };
    log_transition(board, status);
    board.status = status;
    status
}

fn log_transition(board: &BoardState, status: GameStatus) {
    if let GameStatus::Finished { winner, reason } = status {
        match winner {
            Some(color) => debug!("game over at ply {}: {reason}, {color} wins", board.ply),
            None => debug!("game over at ply {}: {reason}, draw", board.ply),
        }
    }
}
