use std::fmt;

/// A coordinate on the 8x8 board, encoded as an index in `0..64`.
/// The encoding is rank-major with `a1 = 0` and `h8 = 63`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const fn from_index(index: u8) -> Self {
        Square(index)
    }

    pub const fn from_rank_file(rank: u8, file: u8) -> Self {
        Square(rank * 8 + file)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rank of the square, `0..8`, where rank 0 is White's back rank.
    pub const fn rank(self) -> u8 {
        self.0 >> 3
    }

    /// File of the square, `0..8`, where file 0 is the a-file.
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    /// The same square on the vertically mirrored board. Used to share
    /// piece-square tables between White and Black.
    pub const fn mirror(self) -> Self {
        Square(self.0 ^ 56)
    }

    /// Steps by the given file/rank deltas, returning `None` if the step
    /// would leave the board.
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::from_rank_file(rank as u8, file as u8))
        } else {
            None
        }
    }

    pub fn from_algebraic(notation: &str) -> Option<Square> {
        let mut chars = notation.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Square::from_rank_file(rank as u8 - b'1', file as u8 - b'a'))
    }

    pub fn to_algebraic(self) -> String {
        format!(
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

macro_rules! define_squares {
    ($($name:ident = $index:expr),* $(,)?) => {
        $(pub const $name: Square = Square::from_index($index);)*
    };
}

#[rustfmt::skip]
define_squares! {
    A1 = 0,  B1 = 1,  C1 = 2,  D1 = 3,  E1 = 4,  F1 = 5,  G1 = 6,  H1 = 7,
    A2 = 8,  B2 = 9,  C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}
