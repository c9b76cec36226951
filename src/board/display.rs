use std::fmt;

use crate::board::square::Square;
use crate::board::Position;

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let square = Square::from_rank_file(rank, file);
                match self.get(square) {
                    Some((piece, color)) => write!(f, "{} ", piece.to_unicode(color))?,
                    None => write!(f, "{} ", if (rank + file) % 2 == 0 { '·' } else { ' ' })?,
                }
            }
            writeln!(f, "{}", rank + 1)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}
