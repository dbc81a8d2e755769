//! Rule knobs owned by a game instance.

use serde::{Deserialize, Serialize};

/// Outcome assigned when the side to move has no legal move and is not in check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StalematePolicy {
    #[default]
    Draw,
    LossForStalemated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Ply count at which the game ends as a draw.
    pub max_plies: u16,
    /// Occurrences of one position (current one included) that end the game.
    pub repetition_threshold: usize,
    pub stalemate_policy: StalematePolicy,
    /// A rejected move ends the game against the side that played it.
    pub illegal_move_forfeits: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_plies: 500,
            repetition_threshold: 4,
            stalemate_policy: StalematePolicy::Draw,
            illegal_move_forfeits: false,
        }
    }
}
