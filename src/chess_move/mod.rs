use std::fmt;

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::square::Square;

/// A single move on the board. Immutable value object: built once by the
/// move generator and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Piece>,
    captured: Option<Piece>,
    castle: bool,
    en_passant: bool,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            captured: None,
            castle: false,
            en_passant: false,
        }
    }

    pub fn capture(from: Square, to: Square, victim: Piece) -> Self {
        Self {
            captured: Some(victim),
            ..Self::new(from, to)
        }
    }

    pub fn promote(from: Square, to: Square, promoted: Piece, victim: Option<Piece>) -> Self {
        Self {
            promotion: Some(promoted),
            captured: victim,
            ..Self::new(from, to)
        }
    }

    pub fn castle(from: Square, to: Square) -> Self {
        Self {
            castle: true,
            ..Self::new(from, to)
        }
    }

    /// En passant always captures the opposing pawn standing beside the
    /// destination square.
    pub fn en_passant(from: Square, to: Square) -> Self {
        Self {
            captured: Some(Piece::Pawn),
            en_passant: true,
            ..Self::new(from, to)
        }
    }

    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    pub fn promotion(&self) -> Option<Piece> {
        self.promotion
    }

    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.castle
    }

    pub fn is_en_passant(&self) -> bool {
        self.en_passant
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promoted) = self.promotion {
            write!(f, "{}", promoted.to_fen(Color::Black))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::*;

    #[test]
    fn test_display_uses_coordinate_notation() {
        assert_eq!(Move::new(E2, E4).to_string(), "e2e4");
        assert_eq!(
            Move::promote(E7, E8, Piece::Queen, None).to_string(),
            "e7e8q"
        );
    }

    #[test]
    fn test_flags() {
        let quiet = Move::new(E2, E4);
        assert!(!quiet.is_capture() && !quiet.is_castle() && !quiet.is_en_passant());

        let ep = Move::en_passant(E5, D6);
        assert!(ep.is_capture() && ep.is_en_passant());
        assert_eq!(ep.captured(), Some(Piece::Pawn));

        assert!(Move::castle(E1, G1).is_castle());
    }
}
