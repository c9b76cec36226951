//! The rules seam of the engine. The search, evaluation, and game control
//! layers never decide legality themselves; they consume it through the
//! [`MoveGenerator`] trait so a different rules implementation can be swapped
//! in without touching the engine.

pub mod generator;

pub use generator::StandardMoveGenerator;

use crate::board::color::Color;
use crate::board::Position;
use crate::chess_move::Move;

/// Why a game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnding {
    Checkmate { winner: Color },
    Stalemate,
    DrawByRule,
}

pub trait MoveGenerator {
    /// All legal moves for the side to move, in a deterministic order.
    fn legal_moves(&self, position: &Position) -> Vec<Move>;

    /// Whether the side to move is currently in check.
    fn is_check(&self, position: &Position) -> bool;

    /// Terminal-state detection. The default covers mate and stalemate plus
    /// the fifty-move rule; implementations may add further draw rules. Mate
    /// and stalemate take precedence over the draw rules.
    fn game_ending(&self, position: &Position) -> Option<GameEnding> {
        if self.legal_moves(position).is_empty() {
            return Some(if self.is_check(position) {
                GameEnding::Checkmate {
                    winner: position.turn().opposite(),
                }
            } else {
                GameEnding::Stalemate
            });
        }
        if position.halfmove_clock() >= 100 {
            return Some(GameEnding::DrawByRule);
        }
        None
    }
}
