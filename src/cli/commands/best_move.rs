//! Best move command - print the engine's move for a position.

use structopt::StructOpt;

use crate::board::Position;
use crate::move_generator::StandardMoveGenerator;
use crate::searcher::{Difficulty, Searcher};

use super::Command;

#[derive(StructOpt)]
pub struct BestMoveArgs {
    #[structopt(short, long, default_value = "medium")]
    pub difficulty: Difficulty,
    #[structopt(long = "fen")]
    pub position: Position,
}

impl Command for BestMoveArgs {
    fn execute(self) {
        let generator = StandardMoveGenerator::new();
        let mut position = self.position;

        match Searcher::new().search(&mut position, &generator, &self.difficulty.profile()) {
            Ok(result) => println!(
                "{} (score {}, {} nodes searched)",
                result.best_move, result.score, result.nodes
            ),
            Err(error) => eprintln!("Failed to calculate best move: {}", error),
        }
    }
}
