//! Static position evaluation. Everything here is deterministic: the same
//! position with the same weights always produces the same score, which is
//! what makes search results reproducible.

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::Position;
use crate::move_generator::MoveGenerator;

use self::tables::{material_value, table_index, KING_ENDGAME_TABLE, PIECE_SQUARE_TABLES};

pub mod tables;

/// Significantly larger than any sum of material and positional terms, so a
/// forced mate always dominates the evaluation. Kept well below `i16::MAX` to
/// leave headroom for the ply adjustment the searcher applies.
pub const MATE_SCORE: i16 = i16::MAX / 2;

/// Per-difficulty evaluation weights. A zero weight disables its term
/// entirely, including the extra move generation that mobility costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalWeights {
    pub mobility: i16,
    pub castle_rights_bonus: i16,
    pub doubled_pawn_penalty: i16,
}

/// Scores the position from White's perspective: positive favors White,
/// negative favors Black. The searcher negates per side to move.
pub fn score<G: MoveGenerator>(position: &Position, generator: &G, weights: &EvalWeights) -> i16 {
    // A captured king cannot occur through legal play, but reduced test
    // positions and quiescence lines deserve a sane answer.
    if position.find_king(Color::White).is_none() {
        return -MATE_SCORE;
    }
    if position.find_king(Color::Black).is_none() {
        return MATE_SCORE;
    }

    let endgame = is_endgame(position);
    let mut total: i16 = 0;

    for (square, piece, color) in position.occupied_squares() {
        let placement = if piece == Piece::King && endgame {
            KING_ENDGAME_TABLE[table_index(color, square)]
        } else {
            PIECE_SQUARE_TABLES[piece as usize][table_index(color, square)]
        };
        total += color.sign() * (material_value(piece) + placement);
    }

    if weights.doubled_pawn_penalty != 0 {
        let white_doubled = doubled_pawn_count(position, Color::White);
        let black_doubled = doubled_pawn_count(position, Color::Black);
        total -= weights.doubled_pawn_penalty * (white_doubled - black_doubled);
    }

    if weights.castle_rights_bonus != 0 {
        total += weights.castle_rights_bonus * castle_rights_balance(position);
    }

    if weights.mobility != 0 {
        let white_mobility = mobility(position, generator, Color::White);
        let black_mobility = mobility(position, generator, Color::Black);
        total += weights.mobility * (white_mobility - black_mobility);
    }

    total
}

/// Legal-move count for `color`, regardless of whose turn it is. Counting for
/// the side not on move requires a pass-turn snapshot; the en passant target
/// is cleared there because it belongs to the side on move.
fn mobility<G: MoveGenerator>(position: &Position, generator: &G, color: Color) -> i16 {
    if position.turn() == color {
        generator.legal_moves(position).len() as i16
    } else {
        let mut passed = position.clone();
        passed.set_turn(color);
        passed.set_en_passant_target(None);
        generator.legal_moves(&passed).len() as i16
    }
}

/// Number of pawns beyond the first on each file.
fn doubled_pawn_count(position: &Position, color: Color) -> i16 {
    let mut per_file = [0i16; 8];
    for (square, piece, piece_color) in position.occupied_squares() {
        if piece == Piece::Pawn && piece_color == color {
            per_file[square.file() as usize] += 1;
        }
    }
    per_file.iter().map(|&count| (count - 1).max(0)).sum()
}

/// +1 if only White retains castle rights, -1 if only Black, 0 otherwise.
fn castle_rights_balance(position: &Position) -> i16 {
    use crate::board::castle_rights::both_rights;
    let white = position.castle_rights() & both_rights(Color::White) != 0;
    let black = position.castle_rights() & both_rights(Color::Black) != 0;
    (white as i16) - (black as i16)
}

/// Endgame once the queens are gone or few pieces remain. Switches the king
/// to its centralizing table.
fn is_endgame(position: &Position) -> bool {
    let mut queens = 0;
    let mut total = 0;
    for (_, piece, _) in position.occupied_squares() {
        total += 1;
        if piece == Piece::Queen {
            queens += 1;
        }
    }
    queens == 0 || total <= 10
}
