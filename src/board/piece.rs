use crate::board::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECES: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

impl Piece {
    pub fn to_fen(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_fen(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((piece, color))
    }

    pub fn to_unicode(self, color: Color) -> char {
        match (self, color) {
            (Piece::King, Color::White) => '♔',
            (Piece::Queen, Color::White) => '♕',
            (Piece::Rook, Color::White) => '♖',
            (Piece::Bishop, Color::White) => '♗',
            (Piece::Knight, Color::White) => '♘',
            (Piece::Pawn, Color::White) => '♙',
            (Piece::King, Color::Black) => '♚',
            (Piece::Queen, Color::Black) => '♛',
            (Piece::Rook, Color::Black) => '♜',
            (Piece::Bishop, Color::Black) => '♝',
            (Piece::Knight, Color::Black) => '♞',
            (Piece::Pawn, Color::Black) => '♟',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_round_trip() {
        for &piece in &ALL_PIECES {
            for &color in &[Color::White, Color::Black] {
                assert_eq!(Piece::from_fen(piece.to_fen(color)), Some((piece, color)));
            }
        }
        assert_eq!(Piece::from_fen('x'), None);
    }
}
