use crate::game_state::{game_state::BoardState, shogi_types::*};

/// Reserve order used when writing hands: rook first, pawn last.
const HAND_WRITE_ORDER: [HandKind; NUM_HAND_KINDS] = [
    HandKind::Rook,
    HandKind::Bishop,
    HandKind::Gold,
    HandKind::Silver,
    HandKind::Knight,
    HandKind::Lance,
    HandKind::Pawn,
];

pub fn generate_sfen(board: &BoardState) -> String {
    let side_to_move = match board.side_to_move {
        Color::Black => "b",
        Color::White => "w",
    };

    format!(
        "{} {} {} {}",
        generate_board_field(board),
        side_to_move,
        generate_hand_field(board),
        u32::from(board.ply) + 1
    )
}

fn generate_board_field(board: &BoardState) -> String {
    let mut out = String::new();

    for row in 0..BOARD_SIZE as u8 {
        let mut empty_count = 0u8;

        for col in 0..BOARD_SIZE as u8 {
            match board.piece_at(square_at(row, col)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    push_piece(&mut out, piece);
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if (row as usize) < BOARD_SIZE - 1 {
            out.push('/');
        }
    }

    out
}

fn generate_hand_field(board: &BoardState) -> String {
    let mut out = String::new();

    for color in Color::ALL {
        for kind in HAND_WRITE_ORDER {
            let count = board.hand_count(color, kind);
            if count == 0 {
                continue;
            }
            if count > 1 {
                out.push_str(&count.to_string());
            }
            out.push(piece_to_sfen_char(kind.piece_kind(), color));
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn push_piece(out: &mut String, piece: Piece) {
    if piece.is_promoted() {
        out.push('+');
    }
    out.push(piece_to_sfen_char(piece.kind.unpromote(), piece.color));
}

fn piece_to_sfen_char(kind: PieceKind, color: Color) -> char {
    let base = match kind.unpromote() {
        PieceKind::Pawn => 'p',
        PieceKind::Lance => 'l',
        PieceKind::Knight => 'n',
        PieceKind::Silver => 's',
        PieceKind::Gold => 'g',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        _ => 'k',
    };

    match color {
        Color::Black => base.to_ascii_uppercase(),
        Color::White => base,
    }
}

#[cfg(test)]
mod tests {
    use super::generate_sfen;
    use crate::game_state::shogi_rules::STARTING_POSITION_SFEN;
    use crate::game_state::shogi_types::*;
    use crate::utils::sfen_parser::parse_sfen;

    #[test]
    fn round_trip_starting_position_sfen() {
        let parsed = parse_sfen(STARTING_POSITION_SFEN).expect("starting SFEN should parse");
        let generated = generate_sfen(&parsed);

        assert_eq!(generated, STARTING_POSITION_SFEN);

        let reparsed = parse_sfen(&generated).expect("generated SFEN should parse");
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn round_trip_custom_position_sfen() {
        let sfen = "ln1g3+Rl/2s1kg3/p1pppp2p/9/1p7/2P6/PPSPPPP1P/7+b1/LN1GKGSNL w RBN2Psp 30";
        let parsed = parse_sfen(sfen).expect("custom SFEN should parse");
        let generated = generate_sfen(&parsed);
        let reparsed = parse_sfen(&generated).expect("generated SFEN should parse");

        assert_eq!(generated, sfen);
        assert_eq!(reparsed, parsed);
        assert_eq!(reparsed.side_to_move, Color::White);
        assert_eq!(reparsed.hand_count(Color::Black, HandKind::Pawn), 2);
        assert_eq!(reparsed.hand_count(Color::White, HandKind::Silver), 1);
        assert_eq!(reparsed.ply, 29);
    }
}
