use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::square::Square;

/// Centipawn values indexed by `Piece as usize`. The king carries no material
/// value; losing it is handled by the saturated scores in the evaluator.
pub const MATERIAL_VALUES: [i16; 6] = [100, 300, 300, 500, 900, 0];

/// Placement bonuses indexed by `Piece as usize`. Each table is laid out
/// visually from White's side of the board: the first row is rank 8, the last
/// row is rank 1. `table_index` performs the per-color transposition.
#[rustfmt::skip]
pub const PIECE_SQUARE_TABLES: [[i16; 64]; 6] = [
    // Pawn
    [
         0,   0,   0,   0,   0,   0,   0,   0,
        50,  50,  50,  50,  50,  50,  50,  50,
        10,  10,  20,  30,  30,  20,  10,  10,
         5,   5,  10,  25,  25,  10,   5,   5,
         0,   0,   0,  20,  20,   0,   0,   0,
         5,  -5, -10,   0,   0, -10,  -5,   5,
         5,  10,  10, -20, -20,  10,  10,   5,
         0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Knight
    [
       -50, -40, -30, -30, -30, -30, -40, -50,
       -40, -20,   0,   0,   0,   0, -20, -40,
       -30,   0,  10,  15,  15,  10,   0, -30,
       -30,   5,  15,  20,  20,  15,   5, -30,
       -30,   0,  15,  20,  20,  15,   0, -30,
       -30,   5,  10,  15,  15,  10,   5, -30,
       -40, -20,   0,   5,   5,   0, -20, -40,
       -50, -40, -30, -30, -30, -30, -40, -50,
    ],
    // Bishop
    [
       -20, -10, -10, -10, -10, -10, -10, -20,
       -10,   0,   0,   0,   0,   0,   0, -10,
       -10,   0,  10,  10,  10,  10,   0, -10,
       -10,   5,   5,  10,  10,   5,   5, -10,
       -10,   0,   5,  10,  10,   5,   0, -10,
       -10,   5,   5,   5,   5,   5,   5, -10,
       -10,   0,   5,   0,   0,   5,   0, -10,
       -20, -10, -10, -10, -10, -10, -10, -20,
    ],
    // Rook
    [
         0,   0,   0,   0,   0,   0,   0,   0,
         5,  10,  10,  10,  10,  10,  10,   5,
        -5,   0,   0,   0,   0,   0,   0,  -5,
        -5,   0,   0,   0,   0,   0,   0,  -5,
        -5,   0,   0,   0,   0,   0,   0,  -5,
        -5,   0,   0,   0,   0,   0,   0,  -5,
        -5,   0,   0,   0,   0,   0,   0,  -5,
         0,   0,   0,   5,   5,   0,   0,   0,
    ],
    // Queen
    [
       -20, -10, -10,  -5,  -5, -10, -10, -20,
       -10,   0,   0,   0,   0,   0,   0, -10,
       -10,   0,   5,   5,   5,   5,   0, -10,
        -5,   0,   5,   5,   5,   5,   0,  -5,
         0,   0,   5,   5,   5,   5,   0,  -5,
       -10,   5,   5,   5,   5,   5,   0, -10,
       -10,   0,   5,   0,   0,   0,   0, -10,
       -20, -10, -10,  -5,  -5, -10, -10, -20,
    ],
    // King (middlegame)
    [
       -30, -40, -40, -50, -50, -40, -40, -30,
       -30, -40, -40, -50, -50, -40, -40, -30,
       -30, -40, -40, -50, -50, -40, -40, -30,
       -30, -40, -40, -50, -50, -40, -40, -30,
       -20, -30, -30, -40, -40, -30, -30, -20,
       -10, -20, -20, -20, -20, -20, -20, -10,
        20,  20,   0,   0,   0,   0,  20,  20,
        20,  30,  10,   0,   0,  10,  30,  20,
    ],
];

/// Once the queens come off the king should walk toward the center rather
/// than hide in a corner.
#[rustfmt::skip]
pub const KING_ENDGAME_TABLE: [i16; 64] = [
   -50, -40, -30, -20, -20, -30, -40, -50,
   -30, -20, -10,   0,   0, -10, -20, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -30,   0,   0,   0,   0, -30, -30,
   -50, -30, -30, -30, -30, -30, -30, -50,
];

/// Maps a square to its entry in the visually-laid-out tables above. The
/// tables are written from White's perspective, so White squares are mirrored
/// across the horizontal axis and Black squares index directly.
#[inline(always)]
pub fn table_index(color: Color, square: Square) -> usize {
    match color {
        Color::White => square.mirror().index(),
        Color::Black => square.index(),
    }
}

#[inline(always)]
pub fn material_value(piece: Piece) -> i16 {
    MATERIAL_VALUES[piece as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::*;

    #[test]
    fn test_table_index_is_color_symmetric() {
        // A white pawn on e2 and a black pawn on e7 occupy mirror squares and
        // must read the same table entry.
        assert_eq!(
            table_index(Color::White, E2),
            table_index(Color::Black, E7)
        );
        let pawn_table = &PIECE_SQUARE_TABLES[Piece::Pawn as usize];
        assert_eq!(pawn_table[table_index(Color::White, E2)], -20);
        assert_eq!(pawn_table[table_index(Color::White, E4)], 20);
        assert_eq!(pawn_table[table_index(Color::Black, D5)], 20);
    }

    #[test]
    fn test_knight_prefers_center() {
        let knight_table = &PIECE_SQUARE_TABLES[Piece::Knight as usize];
        assert_eq!(knight_table[table_index(Color::White, A1)], -50);
        assert_eq!(knight_table[table_index(Color::White, D4)], 20);
    }

    #[test]
    fn test_material_values() {
        assert_eq!(material_value(Piece::Pawn), 100);
        assert_eq!(material_value(Piece::Knight), 300);
        assert_eq!(material_value(Piece::Bishop), 300);
        assert_eq!(material_value(Piece::Rook), 500);
        assert_eq!(material_value(Piece::Queen), 900);
        assert_eq!(material_value(Piece::King), 0);
    }
}
