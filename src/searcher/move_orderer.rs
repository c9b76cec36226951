//! Move ordering for better alpha-beta pruning. Trying the likely-best moves
//! first tightens the window early and prunes more of the tree.

use std::cmp::Reverse;

use crate::board::Position;
use crate::chess_move::Move;
use crate::evaluate::tables::material_value;

/// Keeps every noisy move ahead of every quiet move regardless of how bad the
/// exchange looks (a queen takes pawn still beats any quiet move).
const NOISY_BASE: i16 = 1000;

/// Sorts captures and promotions to the front: captures keyed most-valuable
/// victim with the least valuable attacker, promotions by the promoted piece.
/// Quiet moves keep their generator order, which keeps search deterministic.
pub fn order_moves(moves: &mut [Move], position: &Position) {
    moves.sort_by_key(|mv| Reverse(priority(mv, position)));
}

fn priority(mv: &Move, position: &Position) -> i16 {
    if !mv.is_capture() && mv.promotion().is_none() {
        return 0;
    }

    let mut priority = NOISY_BASE;
    if let Some(victim) = mv.captured() {
        let attacker = position
            .get(mv.from())
            .map(|(piece, _)| material_value(piece))
            .unwrap_or(0);
        priority += material_value(victim) - attacker;
    }
    if let Some(promoted) = mv.promotion() {
        priority += material_value(promoted);
    }
    priority
}
