//! At most one player can own a winning pattern.

use super::Invariant;
use crate::rules::{owner, patterns};
use crate::{GameState, Player};

/// Invariant: winning patterns never belong to both players.
///
/// Play stops at the first completed pattern, so a board where X and O
/// both hold one can only come from tampering.
pub struct SingleWinnerInvariant;

impl SingleWinnerInvariant {
    fn owns_a_pattern(state: &GameState, player: Player) -> bool {
        patterns().any(|pattern| owner(state.board(), pattern) == Some(player))
    }
}

impl Invariant<GameState> for SingleWinnerInvariant {
    fn holds(state: &GameState) -> bool {
        !(Self::owns_a_pattern(state, Player::X) && Self::owns_a_pattern(state, Player::O))
    }

    fn description() -> &'static str {
        "At most one player owns a winning pattern"
    }
}
