//! USI move notation: `7g7f`, `8h2b+`, `P*5e`.
//!
//! USI moves are self-describing, so conversion needs no board. Legality is
//! the caller's business (`validate_move`).

use crate::game_state::shogi_types::*;
use crate::utils::notation_errors::NotationError;
use crate::utils::usi_square::{square_to_usi, usi_to_square};

pub fn move_to_usi(mv: Move) -> String {
    match mv {
        Move::Board { from, to, promote } => {
            let mut out = String::with_capacity(5);
            out.push_str(&square_to_usi(from));
            out.push_str(&square_to_usi(to));
            if promote {
                out.push('+');
            }
            out
        }
        Move::Drop { to, kind } => format!("{}*{}", kind.drop_code(), square_to_usi(to)),
    }
}

pub fn parse_usi_move(text: &str) -> Result<Move, NotationError> {
    let error = |offset: usize, message: &str| NotationError::Move {
        text: text.to_owned(),
        offset,
        message: message.to_owned(),
    };

    if !text.is_ascii() {
        return Err(error(0, "non-ASCII character"));
    }

    let bytes = text.as_bytes();
    if bytes.len() == 4 && bytes[1] == b'*' {
        let code = bytes[0] as char;
        let kind = HandKind::from_drop_code(code)
            .ok_or_else(|| error(0, "drop piece must be one of P L N S G B R"))?;
        let to = usi_to_square(&text[2..4]).map_err(|e| error(2, &e.to_string()))?;
        return Ok(Move::Drop { to, kind });
    }

    let promote = match bytes.len() {
        4 => false,
        5 if bytes[4] == b'+' => true,
        5 => return Err(error(4, "only '+' may follow the destination")),
        _ => return Err(error(0, "expected 4 or 5 characters, or a drop like P*5e")),
    };

    let from = usi_to_square(&text[0..2]).map_err(|e| error(0, &e.to_string()))?;
    let to = usi_to_square(&text[2..4]).map_err(|e| error(2, &e.to_string()))?;
    if from == to {
        return Err(error(2, "destination equals origin"));
    }

    Ok(Move::Board { from, to, promote })
}
