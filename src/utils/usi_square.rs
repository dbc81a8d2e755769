//! Square conversions for USI coordinates.
//!
//! USI names a square by file digit (`9` on the left, `1` on the right from
//! Black's side) and rank letter (`a` at the top). `7g` is row 6, col 2.

use crate::game_state::shogi_types::*;
use crate::utils::notation_errors::NotationError;

/// Convert USI notation (for example: "7g") to a square index.
pub fn usi_to_square(text: &str) -> Result<Square, NotationError> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(NotationError::Square {
            text: text.to_owned(),
            message: "expected a file digit and a rank letter".to_owned(),
        });
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'1'..=b'9').contains(&file) {
        return Err(NotationError::Square {
            text: text.to_owned(),
            message: format!("file '{}' is not in 1..9", file as char),
        });
    }
    if !(b'a'..=b'i').contains(&rank) {
        return Err(NotationError::Square {
            text: text.to_owned(),
            message: format!("rank '{}' is not in a..i", rank as char),
        });
    }

    let col = b'9' - file;
    let row = rank - b'a';
    Ok(square_at(row, col))
}

/// Convert a square index (`0..81`) to USI notation (for example: "7g").
/// Off-board indices render as `?<index>` so rejected moves stay printable.
pub fn square_to_usi(square: Square) -> String {
    if square as usize >= NUM_SQUARES {
        return format!("?{square}");
    }
    let file_char = char::from(b'9' - square_col(square));
    let rank_char = char::from(b'a' + square_row(square));
    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_known_squares() {
        assert_eq!(usi_to_square("9a"), Ok(square_at(0, 0)));
        assert_eq!(usi_to_square("1i"), Ok(square_at(8, 8)));
        assert_eq!(usi_to_square("7g"), Ok(square_at(6, 2)));
        assert_eq!(square_to_usi(square_at(4, 4)), "5e");
        for sq in 0..NUM_SQUARES as Square {
            assert_eq!(usi_to_square(&square_to_usi(sq)), Ok(sq));
        }
    }

    #[test]
    fn off_board_index_is_printable() {
        assert_eq!(square_to_usi(81), "?81");
        assert!(usi_to_square(&square_to_usi(200)).is_err());
    }

    #[test]
    fn rejects_bad_squares() {
        assert!(usi_to_square("0a").is_err());
        assert!(usi_to_square("5j").is_err());
        assert!(usi_to_square("5").is_err());
        assert!(usi_to_square("55a").is_err());
    }
}
