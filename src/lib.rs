//! Crate root module declarations for the Plum Shogi rule engine.
//!
//! This file exposes the board model, rules engine, move executor,
//! termination detection, action-space codec and notation helpers under
//! stable module paths for the owning game loop, tests and benches.

pub mod game_state {
    pub mod game_state;
    pub mod game_status;
    pub mod shogi_rules;
    pub mod shogi_types;
    pub mod undo_state;
    pub mod zobrist;
}

pub mod moves {
    pub mod piece_geometry;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_move_validation;
    pub mod legal_moves_board;
    pub mod legal_moves_drops;
    pub mod perft;
}

pub mod termination {
    pub mod termination_detector;
}

pub mod action_space {
    pub mod codec;
    pub mod observation;
}

pub mod game {
    pub mod game_config;
    pub mod shogi_game;
}

pub mod utils {
    pub mod notation_errors;
    pub mod render_game_state;
    pub mod self_play_harness;
    pub mod sfen_generator;
    pub mod sfen_parser;
    pub mod usi_move;
    pub mod usi_position;
    pub mod usi_square;
}

pub mod errors;
