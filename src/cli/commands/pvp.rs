//! Pvp command - play a game against another human.

use structopt::StructOpt;

use crate::board::Position;
use crate::game::controller::GameController;
use crate::game::GameMode;
use crate::input_handler::fen::STARTING_POSITION_FEN;
use crate::move_generator::StandardMoveGenerator;
use crate::searcher::Difficulty;

use super::util::run_game_loop;
use super::Command;

#[derive(StructOpt)]
pub struct PvpArgs {
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Position,
}

impl Command for PvpArgs {
    fn execute(self) {
        // No searching happens in two-player games, so the difficulty is
        // inert here.
        let mut controller = GameController::from_position(
            StandardMoveGenerator::new(),
            GameMode::TwoPlayer,
            Difficulty::Medium,
            self.starting_position,
        );
        run_game_loop(&mut controller);
    }
}
