//! The recorded outcome always matches what the rules say about the board.

use super::Invariant;
use crate::GameState;
use crate::rules;

/// Invariant: the stored outcome equals the outcome recomputed from the board.
///
/// This also makes "winner" and "draw" mutually exclusive and rules out a
/// full, lineless board that is still marked in progress.
pub struct OutcomeConsistentInvariant;

impl Invariant<GameState> for OutcomeConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        state.outcome() == rules::outcome(state.board())
    }

    fn description() -> &'static str {
        "Recorded outcome matches the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Outcome, Player, Position, Square};

    #[test]
    fn test_new_game_holds() {
        assert!(OutcomeConsistentInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_missing_winner_violates() {
        let mut board = Board::new();
        for pos in [Position::TopLeft, Position::Center, Position::BottomRight] {
            board.set(pos, Square::Occupied(Player::O));
        }
        let state = GameState::from_parts(board, None);
        assert!(!OutcomeConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_premature_draw_violates() {
        let state = GameState::from_parts(Board::new(), Some(Outcome::Draw));
        assert!(!OutcomeConsistentInvariant::holds(&state));
    }
}
