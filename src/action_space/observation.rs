//! Observation tensor for the external policy.
//!
//! Layout is `NUM_CHANNELS x 9 x 9`, channel-major, `f32`, with squares in
//! absolute board orientation (index `row * 9 + col`). "Current" means the
//! side to move.

use crate::game_state::shogi_rules::MAX_HAND_COUNTS;
use crate::game_state::{game_state::BoardState, shogi_types::*};

const NUM_UNPROMOTED: usize = 8;
const NUM_PROMOTED: usize = NUM_PIECE_KINDS - NUM_UNPROMOTED;

pub const CURRENT_UNPROMOTED: usize = 0;
pub const CURRENT_PROMOTED: usize = CURRENT_UNPROMOTED + NUM_UNPROMOTED;
pub const OPPONENT_UNPROMOTED: usize = CURRENT_PROMOTED + NUM_PROMOTED;
pub const OPPONENT_PROMOTED: usize = OPPONENT_UNPROMOTED + NUM_UNPROMOTED;
pub const CURRENT_HAND: usize = OPPONENT_PROMOTED + NUM_PROMOTED;
pub const OPPONENT_HAND: usize = CURRENT_HAND + NUM_HAND_KINDS;
/// 1.0 everywhere when Black is to move.
pub const SIDE_TO_MOVE: usize = OPPONENT_HAND + NUM_HAND_KINDS;
/// `ply / max_plies`, clamped to 1.0.
pub const PLY_PROGRESS: usize = SIDE_TO_MOVE + 1;
pub const NUM_CHANNELS: usize = PLY_PROGRESS + 1;

pub const OBSERVATION_LEN: usize = NUM_CHANNELS * NUM_SQUARES;

/// Channel holding `piece` for an observer whose side to move is `current`.
/// Piece kinds map in declaration order, so base kinds (King included) come
/// first and promoted kinds follow.
#[inline]
pub const fn piece_channel(piece: Piece, current: Color) -> usize {
    let own = piece.color.index() == current.index();
    let kind = piece.kind.index();
    if kind < NUM_UNPROMOTED {
        kind + if own { CURRENT_UNPROMOTED } else { OPPONENT_UNPROMOTED }
    } else {
        kind - NUM_UNPROMOTED + if own { CURRENT_PROMOTED } else { OPPONENT_PROMOTED }
    }
}

pub fn build_observation(board: &BoardState, max_plies: u16) -> Vec<f32> {
    let mut planes = vec![0.0f32; OBSERVATION_LEN];
    let current = board.side_to_move;

    for (sq, occupant) in board.squares.iter().enumerate() {
        if let Some(piece) = occupant {
            planes[piece_channel(*piece, current) * NUM_SQUARES + sq] = 1.0;
        }
    }

    for (base, color) in [(CURRENT_HAND, current), (OPPONENT_HAND, current.opponent())] {
        for kind in ALL_HAND_KINDS {
            let count = board.hand_count(color, kind);
            if count > 0 {
                let value = f32::from(count) / f32::from(MAX_HAND_COUNTS[kind.index()]);
                fill_plane(&mut planes, base + kind.index(), value);
            }
        }
    }

    if current == Color::Black {
        fill_plane(&mut planes, SIDE_TO_MOVE, 1.0);
    }

    let progress = if max_plies == 0 {
        1.0
    } else {
        (f32::from(board.ply) / f32::from(max_plies)).min(1.0)
    };
    fill_plane(&mut planes, PLY_PROGRESS, progress);

    planes
}

#[inline]
fn fill_plane(planes: &mut [f32], channel: usize, value: f32) {
    let start = channel * NUM_SQUARES;
    planes[start..start + NUM_SQUARES].fill(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(obs: &[f32], channel: usize) -> &[f32] {
        &obs[channel * NUM_SQUARES..(channel + 1) * NUM_SQUARES]
    }

    #[test]
    fn channel_layout_is_frozen() {
        assert_eq!(CURRENT_PROMOTED, 8);
        assert_eq!(OPPONENT_UNPROMOTED, 14);
        assert_eq!(OPPONENT_PROMOTED, 22);
        assert_eq!(CURRENT_HAND, 28);
        assert_eq!(OPPONENT_HAND, 35);
        assert_eq!(SIDE_TO_MOVE, 42);
        assert_eq!(NUM_CHANNELS, 44);
    }

    #[test]
    fn start_position_planes() {
        let board = BoardState::new_game();
        let obs = build_observation(&board, 500);
        assert_eq!(obs.len(), OBSERVATION_LEN);

        let own_pawns = plane(&obs, CURRENT_UNPROMOTED + PieceKind::Pawn.index());
        assert_eq!(own_pawns.iter().sum::<f32>(), 9.0);
        assert_eq!(own_pawns[square_at(6, 0) as usize], 1.0);

        let their_king = plane(&obs, OPPONENT_UNPROMOTED + PieceKind::King.index());
        assert_eq!(their_king[square_at(0, 4) as usize], 1.0);

        assert!(plane(&obs, SIDE_TO_MOVE).iter().all(|v| *v == 1.0));
        assert!(plane(&obs, PLY_PROGRESS).iter().all(|v| *v == 0.0));
        assert!(obs[CURRENT_HAND * NUM_SQUARES..SIDE_TO_MOVE * NUM_SQUARES]
            .iter()
            .all(|v| *v == 0.0));
    }

    #[test]
    fn perspective_follows_side_to_move() {
        let board = BoardState::from_sfen("4k4/9/9/9/9/9/9/9/4K2+R1 w 2Pb 251")
            .expect("test SFEN should parse");
        let obs = build_observation(&board, 500);

        let dragon = Piece::new(PieceKind::Dragon, Color::Black);
        assert_eq!(piece_channel(dragon, Color::White), OPPONENT_PROMOTED + 5);
        assert_eq!(plane(&obs, OPPONENT_PROMOTED + 5)[square_at(8, 7) as usize], 1.0);

        assert!(plane(&obs, CURRENT_HAND + HandKind::Bishop.index()).iter().all(|v| *v == 0.5));
        let pawns = plane(&obs, OPPONENT_HAND + HandKind::Pawn.index());
        assert!(pawns.iter().all(|v| (*v - 2.0 / 18.0).abs() < 1e-6));

        assert!(plane(&obs, SIDE_TO_MOVE).iter().all(|v| *v == 0.0));
        assert!(plane(&obs, PLY_PROGRESS).iter().all(|v| *v == 0.5));
    }
}
