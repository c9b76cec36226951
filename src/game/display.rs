use std::fmt::Write;

use termion::{clear, cursor};

use crate::board::square::Square;
use crate::board::Position;
use crate::move_generator::GameEnding;

/// Frame-at-a-time terminal renderer. Builds the whole frame in a buffer and
/// prints it in one call so the board never tears mid-draw.
pub struct GameDisplay {
    buffer: String,
}

impl GameDisplay {
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(2048),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        write!(self.buffer, "{}{}", cursor::Goto(1, 1), clear::All).unwrap();
    }

    pub fn render_game_state(
        &mut self,
        position: &Position,
        last_move: Option<&str>,
        stats: Option<&str>,
        ending: Option<GameEnding>,
    ) {
        self.clear();

        self.buffer.push_str("    a   b   c   d   e   f   g   h\n");
        self.buffer
            .push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for rank in (0..8u8).rev() {
            self.buffer.push_str(&format!("{} │", rank + 1));
            for file in 0..8u8 {
                let square = Square::from_rank_file(rank, file);
                let piece_str = match position.get(square) {
                    Some((piece, color)) => piece.to_unicode(color).to_string(),
                    None => if (rank + file) % 2 == 0 { " " } else { "·" }.to_string(),
                };
                self.buffer.push_str(&format!(" {} │", piece_str));
            }
            self.buffer.push_str(&format!(" {}\n", rank + 1));

            if rank > 0 {
                self.buffer
                    .push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            } else {
                self.buffer
                    .push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
            }
        }

        self.buffer
            .push_str("    a   b   c   d   e   f   g   h\n\n");

        match ending {
            Some(GameEnding::Checkmate { winner }) => {
                self.buffer
                    .push_str(&format!("Checkmate! {} wins.\n", winner));
            }
            Some(GameEnding::Stalemate) => {
                self.buffer.push_str("Stalemate.\n");
            }
            Some(GameEnding::DrawByRule) => {
                self.buffer.push_str("Draw.\n");
            }
            None => {
                self.buffer
                    .push_str(&format!("Turn: {}\n", position.turn()));
            }
        }

        if let Some(notation) = last_move {
            self.buffer.push_str(&format!("Last move: {}\n", notation));
        }

        if let Some(stats) = stats {
            self.buffer.push_str(&format!("\n{}\n", stats));
        }

        print!("{}", self.buffer);
    }

    pub fn buffer(self) -> String {
        self.buffer
    }
}

impl Default for GameDisplay {
    fn default() -> Self {
        Self::new()
    }
}
