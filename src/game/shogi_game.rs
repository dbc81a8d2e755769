//! Game loop facade.
//!
//! `ShogiGame` owns one position and its rule configuration and is the
//! surface an owning loop drives: reset, query legal moves or the action
//! mask, submit a move (validated, applied, then checked for termination),
//! read the outcome.

use log::{debug, trace, warn};

use crate::action_space::codec::{legal_mask, move_of};
use crate::action_space::observation::build_observation;
use crate::errors::{ShogiError, ShogiResult};
use crate::game::game_config::RulesConfig;
use crate::game_state::game_state::BoardState;
use crate::game_state::game_status::{GameStatus, TerminationReason};
use crate::game_state::shogi_types::*;
use crate::move_generation::legal_move_apply::{apply_move, revert_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::legal_move_validation::validate_move;
use crate::termination::termination_detector::{forfeit_illegal_move, resign, update_termination};
use crate::utils::usi_move::parse_usi_move;

#[derive(Debug, Clone)]
pub struct ShogiGame {
    board: BoardState,
    config: RulesConfig,
}

impl Default for ShogiGame {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

impl ShogiGame {
    /// A game at the standard starting position.
    pub fn new(config: RulesConfig) -> Self {
        Self {
            board: BoardState::new_game(),
            config,
        }
    }

    /// A game starting from an SFEN position. A position that is already
    /// terminal (for example checkmate) is reported as finished immediately.
    pub fn from_sfen(sfen: &str, config: RulesConfig) -> ShogiResult<Self> {
        let mut board = BoardState::from_sfen(sfen)?;
        update_termination(&mut board, &config);
        Ok(Self { board, config })
    }

    /// Back to the starting position, history cleared.
    pub fn reset(&mut self) {
        debug!("game reset");
        self.board = BoardState::new_game();
    }

    #[inline]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[inline]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn sfen(&self) -> String {
        self.board.get_sfen()
    }

    pub fn legal_moves(&mut self) -> Vec<Move> {
        generate_legal_moves(&mut self.board)
    }

    pub fn legal_mask(&mut self) -> ShogiResult<Vec<bool>> {
        Ok(legal_mask(&mut self.board)?)
    }

    pub fn observation(&self) -> Vec<f32> {
        build_observation(&self.board, self.config.max_plies)
    }

    /// Validate and apply `mv`, then update the terminal status.
    ///
    /// A rejected move leaves the position untouched unless
    /// `illegal_move_forfeits` is set, in which case the mover loses.
    pub fn play(&mut self, mv: Move) -> ShogiResult<GameStatus> {
        if let Err(kind) = validate_move(&mut self.board, mv) {
            warn!("rejected move {mv} at ply {}: {kind}", self.board.ply);
            if self.config.illegal_move_forfeits && !self.board.is_over() {
                let offender = self.board.side_to_move;
                forfeit_illegal_move(&mut self.board, offender);
            }
            return Err(ShogiError::IllegalMove { mv, kind });
        }

        trace!("ply {}: {} plays {mv}", self.board.ply, self.board.side_to_move);
        apply_move(&mut self.board, mv);
        Ok(update_termination(&mut self.board, &self.config))
    }

    /// Parse a USI move (`7g7f`, `8h2b+`, `P*5e`) and play it.
    pub fn play_usi(&mut self, text: &str) -> ShogiResult<GameStatus> {
        let mv = parse_usi_move(text)?;
        self.play(mv)
    }

    /// Decode an action index and play the move.
    pub fn play_action(&mut self, index: usize) -> ShogiResult<GameStatus> {
        let mv = move_of(index)?;
        self.play(mv)
    }

    /// Take back the last applied move, restoring the status it found.
    ///
    /// A game ended by resignation or a declared illegal move stays over:
    /// those results come from outside the move history, so nothing is undone.
    pub fn undo(&mut self) -> Option<Move> {
        if matches!(
            self.board.termination_reason(),
            Some(TerminationReason::Resignation | TerminationReason::IllegalMove)
        ) {
            return None;
        }
        let record = *self.board.move_history.last()?;
        revert_move(&mut self.board, &record);
        Some(record.mv)
    }

    pub fn resign(&mut self, color: Color) -> GameStatus {
        resign(&mut self.board, color)
    }

    /// External referee decision: `offender` loses by illegal move.
    pub fn declare_illegal_move(&mut self, offender: Color) -> GameStatus {
        forfeit_illegal_move(&mut self.board, offender)
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.board.status
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.board.is_over()
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.board.winner()
    }

    #[inline]
    pub fn termination_reason(&self) -> Option<TerminationReason> {
        self.board.termination_reason()
    }

    #[inline]
    pub fn repetition_count(&self) -> usize {
        self.board.repetition_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action_space::codec::{index_of, NUM_ACTIONS};
    use crate::move_generation::legal_move_validation::IllegalMoveKind;
    use crate::utils::notation_errors::NotationError;
    use crate::utils::self_play_harness::random_reachable_positions;
    use crate::utils::usi_move::move_to_usi;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn six_ply_opening_reaches_expected_position() {
        let mut game = ShogiGame::default();
        for usi in ["7g7f", "3c3d", "2g2f", "8c8d", "2f2e", "8d8e"] {
            let status = game.play_usi(usi).expect("opening move should be legal");
            assert_eq!(status, GameStatus::Ongoing);
        }
        assert_eq!(
            game.sfen(),
            "lnsgkgsnl/1r5b1/p1pppp1pp/6p2/1p5P1/2P6/PP1PPPP1P/1B5R1/LNSGKGSNL b - 7"
        );
        assert_eq!(game.board().ply, 6);
        assert_eq!(game.board().side_to_move, Color::Black);
    }

    #[test]
    fn rejected_move_leaves_position_untouched() {
        let mut game = ShogiGame::default();
        let before = game.board().clone();
        let err = game.play_usi("7g7e").expect_err("pawn cannot jump two squares");
        assert!(matches!(
            err,
            ShogiError::IllegalMove {
                kind: IllegalMoveKind::Unreachable,
                ..
            }
        ));
        assert_eq!(game.board(), &before);
        assert!(matches!(game.play_usi("7g"), Err(ShogiError::Notation(_))));
        assert!(matches!(game.play_action(NUM_ACTIONS), Err(ShogiError::Codec(_))));
    }

    #[test]
    fn illegal_move_forfeits_when_configured() {
        let config = RulesConfig {
            illegal_move_forfeits: true,
            ..RulesConfig::default()
        };
        let mut game = ShogiGame::new(config);
        assert!(game.play_usi("5i5g").is_err());
        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(game.termination_reason(), Some(TerminationReason::IllegalMove));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn play_action_and_undo() {
        let mut game = ShogiGame::default();
        let start = game.board().clone();
        let index = index_of(parse_usi_move("2g2f").expect("valid move")).expect("encodable");
        assert!(game.legal_mask().expect("mask builds")[index]);

        game.play_action(index).expect("legal action");
        assert_eq!(game.board().side_to_move, Color::White);
        assert_eq!(game.undo().map(move_to_usi).as_deref(), Some("2g2f"));
        assert_eq!(game.board(), &start);
        assert_eq!(game.undo(), None);
    }

    #[test]
    fn resignation_and_terminal_sfen() {
        let mut game = ShogiGame::default();
        assert_eq!(game.resign(Color::White).winner(), Some(Color::Black));
        assert!(matches!(
            game.play_usi("7g7f"),
            Err(ShogiError::IllegalMove {
                kind: IllegalMoveKind::GameOver,
                ..
            })
        ));
        game.reset();
        assert!(!game.is_over());

        let mated = ShogiGame::from_sfen("4k4/4G4/4P4/9/9/9/9/9/4K4 w - 1", RulesConfig::default())
            .expect("test SFEN should parse");
        assert_eq!(mated.termination_reason(), Some(TerminationReason::Checkmate));
        assert_eq!(mated.winner(), Some(Color::Black));
    }

    #[test]
    fn off_board_move_error_is_displayable() {
        let mut game = ShogiGame::default();
        let mv = Move::Board {
            from: 81,
            to: 3,
            promote: false,
        };
        let err = game.play(mv).expect_err("off-board origin is rejected");
        assert_eq!(
            err,
            ShogiError::IllegalMove {
                mv,
                kind: IllegalMoveKind::OutOfBounds
            }
        );
        let text = format!("{err}");
        assert!(text.starts_with("illegal move ?816a:"), "{text}");
    }

    #[test]
    fn capturable_king_position_is_refused() {
        let result = ShogiGame::from_sfen("4k4/4R4/9/9/9/9/9/9/4K4 b - 1", RulesConfig::default());
        assert!(matches!(
            result,
            Err(ShogiError::Notation(NotationError::Inconsistent { .. }))
        ));
    }

    #[test]
    fn undo_keeps_external_results() {
        let mut game = ShogiGame::default();
        game.play(Move::board(6, 2, 5, 2, false)).expect("7g7f is legal");
        game.resign(Color::White);
        assert_eq!(game.undo(), None);
        assert!(game.is_over());
        assert_eq!(game.board().ply, 1);

        let mut game = ShogiGame::default();
        game.play(Move::board(6, 2, 5, 2, false)).expect("7g7f is legal");
        game.declare_illegal_move(Color::White);
        assert_eq!(game.undo(), None);
        assert_eq!(game.winner(), Some(Color::Black));
    }

    #[test]
    fn declared_illegal_move_ends_game() {
        let mut game = ShogiGame::default();
        let status = game.declare_illegal_move(Color::Black);
        assert_eq!(status.winner(), Some(Color::White));
        assert_eq!(game.status(), status);
        assert_eq!(game.observation().len(), crate::action_space::observation::OBSERVATION_LEN);
    }

    #[test]
    fn apply_revert_is_exact_on_reachable_positions() {
        for mut board in random_reachable_positions(3, 40, 150) {
            let snapshot = board.clone();
            for mv in generate_legal_moves(&mut board) {
                let record = apply_move(&mut board, mv);
                revert_move(&mut board, &record);
                assert_eq!(board, snapshot, "{mv} in {}", snapshot.get_sfen());
            }
        }
    }

    #[test]
    fn notation_round_trips_on_reachable_positions() {
        let mut rng = StdRng::seed_from_u64(17);
        let positions = random_reachable_positions(5, 120, 160);
        assert!(positions.len() >= 100);

        for mut board in positions {
            let sfen = board.get_sfen();
            let parsed = BoardState::from_sfen(&sfen).expect("generated SFEN should parse");
            assert!(parsed.same_position(&board), "{sfen}");
            assert_eq!(parsed.get_sfen(), sfen);

            let moves = generate_legal_moves(&mut board);
            if moves.is_empty() {
                continue;
            }
            let mv = moves[rng.random_range(0..moves.len())];
            assert_eq!(parse_usi_move(&move_to_usi(mv)), Ok(mv));
        }
    }

    #[test]
    fn generated_moves_are_sound_on_reachable_positions() {
        use crate::move_generation::legal_move_checks::is_in_check;

        for mut board in random_reachable_positions(23, 40, 120) {
            let mover = board.side_to_move;
            for mv in generate_legal_moves(&mut board) {
                assert_eq!(validate_move(&mut board, mv), Ok(()), "{mv}");
                let record = apply_move(&mut board, mv);
                assert!(!is_in_check(&board, mover));
                revert_move(&mut board, &record);
            }
        }
    }
}
