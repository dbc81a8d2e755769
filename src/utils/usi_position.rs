//! USI `position` command read/write for game record interchange.
//!
//! `position startpos moves 7g7f 3c3d` or `position sfen <sfen> moves ...`.
//! Reading replays every move through `validate_move`, so a record that parses
//! is a legal game. Errors name the index of the offending whitespace token.

use crate::errors::{ShogiError, ShogiResult};
use crate::game_state::game_state::BoardState;
use crate::game_state::shogi_rules::STARTING_POSITION_SFEN;
use crate::game_state::shogi_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_validation::validate_move;
use crate::utils::notation_errors::NotationError;
use crate::utils::usi_move::{move_to_usi, parse_usi_move};

/// Number of whitespace-separated fields in an SFEN string.
const SFEN_FIELDS: usize = 4;

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub initial_state: BoardState,
    pub moves: Vec<Move>,
    pub final_state: BoardState,
}

pub fn write_position_command(initial_state: &BoardState, moves: &[Move]) -> String {
    let sfen = initial_state.get_sfen();
    let mut out = if sfen == STARTING_POSITION_SFEN {
        "position startpos".to_owned()
    } else {
        format!("position sfen {sfen}")
    };

    if !moves.is_empty() {
        out.push_str(" moves");
        for mv in moves {
            out.push(' ');
            out.push_str(&move_to_usi(*mv));
        }
    }
    out
}

pub fn read_position_command(text: &str) -> ShogiResult<GameRecord> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let command_error = |token: usize, message: &str| NotationError::Command {
        token,
        message: message.to_owned(),
    };

    if tokens.first() != Some(&"position") {
        return Err(command_error(0, "expected 'position'").into());
    }

    let (initial_state, mut cursor) = match tokens.get(1) {
        Some(&"startpos") => (BoardState::new_game(), 2),
        Some(&"sfen") => {
            let end = 2 + SFEN_FIELDS;
            if tokens.len() < end {
                return Err(command_error(tokens.len(), "truncated SFEN").into());
            }
            (BoardState::from_sfen(&tokens[2..end].join(" "))?, end)
        }
        _ => return Err(command_error(1, "expected 'startpos' or 'sfen'").into()),
    };

    let mut moves = Vec::new();
    let mut state = initial_state.clone();
    if cursor < tokens.len() {
        if tokens[cursor] != "moves" {
            return Err(command_error(cursor, "expected 'moves'").into());
        }
        cursor += 1;

        for (token, text) in tokens.iter().enumerate().skip(cursor) {
            let mv = parse_usi_move(text).map_err(|err| command_error(token, &err.to_string()))?;
            validate_move(&mut state, mv)
                .map_err(|kind| ShogiError::IllegalRecordMove { token, mv, kind })?;
            apply_move(&mut state, mv);
            moves.push(mv);
        }
    }

    Ok(GameRecord {
        initial_state,
        moves,
        final_state: state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_validation::IllegalMoveKind;

    #[test]
    fn round_trip_from_start_position() {
        let text = "position startpos moves 7g7f 3c3d 8h2b+ 3a2b B*4e";
        let record = read_position_command(text).expect("record should parse");
        assert_eq!(record.moves.len(), 5);
        assert_eq!(record.final_state.hand_count(Color::Black, HandKind::Bishop), 0);
        assert_eq!(record.final_state.hand_count(Color::White, HandKind::Bishop), 1);
        assert_eq!(write_position_command(&record.initial_state, &record.moves), text);
    }

    #[test]
    fn round_trip_from_custom_sfen() {
        let text = "position sfen 4k4/9/9/9/9/9/9/9/4K4 b G 1 moves G*5b 5a5b";
        let record = read_position_command(text).expect("record should parse");
        assert_eq!(record.final_state.get_sfen(), "9/4k4/9/9/9/9/9/9/4K4 b g 3");
        assert_eq!(write_position_command(&record.initial_state, &record.moves), text);
        assert_eq!(
            write_position_command(&record.initial_state, &[]),
            "position sfen 4k4/9/9/9/9/9/9/9/4K4 b G 1"
        );
    }

    #[test]
    fn rejects_malformed_and_illegal_records() {
        assert!(matches!(
            read_position_command("go startpos"),
            Err(ShogiError::Notation(NotationError::Command { token: 0, .. }))
        ));
        assert!(matches!(
            read_position_command("position sfen 9/9 b"),
            Err(ShogiError::Notation(NotationError::Command { .. }))
        ));
        assert!(matches!(
            read_position_command("position startpos 7g7f"),
            Err(ShogiError::Notation(NotationError::Command { token: 2, .. }))
        ));
        assert!(matches!(
            read_position_command("position startpos moves 7g7f 7g7f"),
            Err(ShogiError::IllegalRecordMove {
                token: 4,
                kind: IllegalMoveKind::EmptyOrigin,
                ..
            })
        ));
    }

    #[test]
    fn bad_move_tokens_report_their_index() {
        assert!(matches!(
            read_position_command("position startpos moves 7g7f 3c3d 2g2x"),
            Err(ShogiError::Notation(NotationError::Command { token: 5, .. }))
        ));
        assert!(matches!(
            read_position_command("position sfen 4k4/9/9/9/9/9/9/9/4K4 b G 1 moves G*5b 5a5c"),
            Err(ShogiError::IllegalRecordMove {
                token: 8,
                kind: IllegalMoveKind::Unreachable,
                ..
            })
        ));
    }
}
