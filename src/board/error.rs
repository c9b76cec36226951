use crate::board::square::Square;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("square {square} is already occupied")]
    SquareOccupied { square: Square },
    #[error("no piece on square {square}")]
    EmptySquare { square: Square },
    #[error("no rook available for castling on square {square}")]
    MissingCastleRook { square: Square },
}
