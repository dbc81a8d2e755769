//! SFEN-to-BoardState parser.
//!
//! Builds a complete position (grid, reserves, side to move, ply) from
//! `<board> <b|w> <hand|-> <move number>`. The board is assembled in a local
//! value and only returned once every field and consistency check passed.

use crate::game_state::shogi_rules::{has_future_move, MAX_HAND_COUNTS};
use crate::game_state::{game_state::BoardState, shogi_types::*};
use crate::move_generation::legal_move_checks::is_in_check;
use crate::utils::notation_errors::NotationError;

pub fn parse_sfen(sfen: &str) -> Result<BoardState, NotationError> {
    let mut parts = sfen.split_whitespace();

    let board_part = parts.next().ok_or(NotationError::MissingField { field: "board" })?;
    let side_part = parts
        .next()
        .ok_or(NotationError::MissingField { field: "side-to-move" })?;
    let hand_part = parts.next().ok_or(NotationError::MissingField { field: "hand" })?;
    let move_number_part = parts
        .next()
        .ok_or(NotationError::MissingField { field: "move number" })?;

    if let Some(extra) = parts.next() {
        return Err(NotationError::TrailingField {
            extra: extra.to_owned(),
        });
    }

    let mut board = BoardState::new_empty();

    parse_board(board_part, &mut board)?;
    board.side_to_move = parse_side_to_move(side_part)?;
    board.hands = parse_hands(hand_part)?;
    board.ply = parse_move_number(move_number_part)?;

    board.refresh_derived();
    check_consistency(&board)?;

    Ok(board)
}

fn parse_board(board_part: &str, board: &mut BoardState) -> Result<(), NotationError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != BOARD_SIZE {
        return Err(NotationError::Board {
            rank: '?',
            row: ranks.len(),
            message: format!("expected {BOARD_SIZE} ranks separated by '/', found {}", ranks.len()),
        });
    }

    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = char::from(b'a' + row as u8);
        let fail = |message: String| NotationError::Board { rank, row, message };

        let mut col = 0usize;
        let mut promoted = false;

        for ch in rank_str.chars() {
            if ch == '+' {
                if promoted {
                    return Err(fail("doubled '+'".to_owned()));
                }
                promoted = true;
                continue;
            }

            if let Some(empty_count) = ch.to_digit(10) {
                if promoted {
                    return Err(fail("'+' must be followed by a piece letter".to_owned()));
                }
                if !(1..=9).contains(&empty_count) {
                    return Err(fail(format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as usize;
                if col > BOARD_SIZE {
                    return Err(fail(format!("more than {BOARD_SIZE} files")));
                }
                continue;
            }

            let (kind, color) =
                piece_from_sfen_char(ch).ok_or_else(|| fail(format!("invalid piece character '{ch}'")))?;
            let kind = if promoted {
                if !kind.is_promotable() {
                    return Err(fail(format!("'{ch}' cannot be promoted")));
                }
                kind.promote()
            } else {
                kind
            };
            promoted = false;

            if col >= BOARD_SIZE {
                return Err(fail(format!("more than {BOARD_SIZE} files")));
            }
            board.squares[square_at(row as u8, col as u8) as usize] = Some(Piece::new(kind, color));
            col += 1;
        }

        if promoted {
            return Err(fail("rank ends with a dangling '+'".to_owned()));
        }
        if col != BOARD_SIZE {
            return Err(fail(format!("rank covers {col} files, expected {BOARD_SIZE}")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, NotationError> {
    match side_part {
        "b" => Ok(Color::Black),
        "w" => Ok(Color::White),
        _ => Err(NotationError::SideToMove {
            value: side_part.to_owned(),
        }),
    }
}

fn parse_hands(hand_part: &str) -> Result<[[u8; NUM_HAND_KINDS]; 2], NotationError> {
    let mut hands = [[0u8; NUM_HAND_KINDS]; 2];
    if hand_part == "-" {
        return Ok(hands);
    }

    let mut count: Option<u32> = None;
    for (offset, ch) in hand_part.char_indices() {
        let fail = |message: String| NotationError::Hand { offset, message };

        if let Some(digit) = ch.to_digit(10) {
            let next = count.unwrap_or(0) * 10 + digit;
            if next == 0 || next > u32::from(MAX_HAND_COUNTS[HandKind::Pawn.index()]) {
                return Err(fail(format!("count {next} is out of range")));
            }
            count = Some(next);
            continue;
        }

        let (kind, color) = piece_from_sfen_char(ch)
            .ok_or_else(|| fail(format!("invalid hand piece '{ch}'")))?;
        let hand_kind = HandKind::from_piece_kind(kind)
            .ok_or_else(|| fail(format!("'{ch}' cannot be held in hand")))?;

        let slot = &mut hands[color.index()][hand_kind.index()];
        if *slot != 0 {
            return Err(fail(format!("'{ch}' listed twice")));
        }
        *slot = count.take().unwrap_or(1) as u8;
    }

    if count.is_some() {
        return Err(NotationError::Hand {
            offset: hand_part.len(),
            message: "count without a piece letter".to_owned(),
        });
    }

    Ok(hands)
}

/// Move number `n` means ply `n - 1`; the largest representable ply is
/// `u16::MAX`, where the ply counter saturates.
fn parse_move_number(move_number_part: &str) -> Result<u16, NotationError> {
    match move_number_part.parse::<u32>() {
        Ok(number) if (1..=u32::from(u16::MAX) + 1).contains(&number) => Ok((number - 1) as u16),
        _ => Err(NotationError::MoveNumber {
            value: move_number_part.to_owned(),
        }),
    }
}

fn check_consistency(board: &BoardState) -> Result<(), NotationError> {
    let inconsistent = |message: String| NotationError::Inconsistent { message };

    for color in Color::ALL {
        let kings = board.king_count(color);
        if kings != 1 {
            return Err(inconsistent(format!("{color} has {kings} kings, expected 1")));
        }
    }

    let waiting = board.side_to_move.opponent();
    if is_in_check(board, waiting) {
        return Err(inconsistent(format!(
            "{waiting} is in check but {} is to move",
            board.side_to_move
        )));
    }

    let mut totals = [0u32; NUM_HAND_KINDS];
    for (sq, occupant) in board.squares.iter().enumerate() {
        let Some(piece) = occupant else {
            continue;
        };
        if let Some(hand_kind) = piece.kind.hand_kind() {
            totals[hand_kind.index()] += 1;
        }
        if !piece.is_promoted() && !has_future_move(piece.kind, piece.color, sq as Square) {
            return Err(inconsistent(format!(
                "unpromoted {:?} on row {} can never move",
                piece.kind,
                square_row(sq as Square)
            )));
        }
    }
    for color in Color::ALL {
        for kind in ALL_HAND_KINDS {
            totals[kind.index()] += u32::from(board.hand_count(color, kind));
        }
    }
    for kind in ALL_HAND_KINDS {
        let max = u32::from(MAX_HAND_COUNTS[kind.index()]);
        if totals[kind.index()] > max {
            return Err(inconsistent(format!(
                "{} {:?} pieces in play, at most {max} exist",
                totals[kind.index()],
                kind
            )));
        }
    }

    Ok(())
}

pub(crate) fn piece_from_sfen_char(ch: char) -> Option<(PieceKind, Color)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Black
    } else if ch.is_ascii_lowercase() {
        Color::White
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'l' => PieceKind::Lance,
        'n' => PieceKind::Knight,
        's' => PieceKind::Silver,
        'g' => PieceKind::Gold,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((kind, color))
}
