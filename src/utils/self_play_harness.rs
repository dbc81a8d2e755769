//! Seeded random self-play for tests, benches and smoke runs.
//!
//! Both sides pick uniformly among legal moves. Games run through the same
//! termination detector as the game facade, so every record ends in a
//! definite status.

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::game::game_config::RulesConfig;
use crate::game::shogi_game::ShogiGame;
use crate::game_state::game_state::BoardState;
use crate::game_state::game_status::{GameStatus, TerminationReason};
use crate::game_state::shogi_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::utils::usi_move::move_to_usi;

#[derive(Debug, Clone)]
pub struct SelfPlayRecord {
    pub seed: u64,
    pub start_sfen: String,
    pub moves_usi: Vec<String>,
    pub final_state: BoardState,
    pub status: GameStatus,
}

#[derive(Debug, Clone, Default)]
pub struct SelfPlayStats {
    pub games: u16,
    pub black_wins: u16,
    pub white_wins: u16,
    pub draws: u16,
    pub reasons: Vec<TerminationReason>,
    pub total_plies: u64,
}

impl SelfPlayStats {
    pub fn report(&self) -> String {
        let avg_plies = if self.games == 0 {
            0.0
        } else {
            self.total_plies as f64 / f64::from(self.games)
        };
        format!(
            "games={} black_wins={} white_wins={} draws={} avg_plies={:.1}",
            self.games, self.black_wins, self.white_wins, self.draws, avg_plies
        )
    }
}

/// Play one game of uniformly random legal moves from the start position.
pub fn play_random_game(seed: u64, config: RulesConfig) -> SelfPlayRecord {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = ShogiGame::new(config);
    let start_sfen = game.sfen();
    let mut moves_usi = Vec::new();

    while !game.is_over() {
        let moves = game.legal_moves();
        // A live position always has a reply; the detector ends the game otherwise.
        let Some(&mv) = moves.get(rng.random_range(0..moves.len().max(1))) else {
            break;
        };
        moves_usi.push(move_to_usi(mv));
        if game.play(mv).is_err() {
            break;
        }
    }

    SelfPlayRecord {
        seed,
        start_sfen,
        moves_usi,
        final_state: game.board().clone(),
        status: game.status(),
    }
}

/// Play `games` random games with consecutive seeds and tally the outcomes.
pub fn play_self_play_series(base_seed: u64, games: u16, config: RulesConfig) -> SelfPlayStats {
    let mut stats = SelfPlayStats {
        games,
        ..SelfPlayStats::default()
    };

    for i in 0..games {
        let record = play_random_game(base_seed.wrapping_add(u64::from(i)), config);
        stats.total_plies += u64::from(record.final_state.ply);

        match record.status.winner() {
            Some(Color::Black) => stats.black_wins += 1,
            Some(Color::White) => stats.white_wins += 1,
            None => stats.draws += 1,
        }
        if let Some(reason) = record.status.reason() {
            stats.reasons.push(reason);
        }
        debug!("self-play game {} seed={} status={:?}", i + 1, record.seed, record.status);
    }

    stats
}

/// `count` positions reached by random play from the start, each after a
/// random number of plies in `0..=max_plies`. A walk stops early when the
/// side to move has no legal move.
pub fn random_reachable_positions(seed: u64, count: usize, max_plies: u16) -> Vec<BoardState> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = Vec::with_capacity(count);

    for _ in 0..count {
        let target = rng.random_range(0..=max_plies);
        let mut board = BoardState::new_game();
        while board.ply < target {
            let moves = generate_legal_moves(&mut board);
            if moves.is_empty() {
                break;
            }
            apply_move(&mut board, moves[rng.random_range(0..moves.len())]);
        }
        positions.push(board);
    }

    positions
}
