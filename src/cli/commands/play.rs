//! Play command - play a game against the computer.

use structopt::StructOpt;

use crate::board::color::Color;
use crate::board::Position;
use crate::game::controller::GameController;
use crate::game::GameMode;
use crate::input_handler::fen::STARTING_POSITION_FEN;
use crate::move_generator::StandardMoveGenerator;
use crate::searcher::Difficulty;

use super::util::run_game_loop;
use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(short, long, default_value = "medium")]
    pub difficulty: Difficulty,
    #[structopt(short = "c", long = "color", default_value = "white")]
    pub color: Color,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Position,
}

impl Command for PlayArgs {
    fn execute(self) {
        let mut controller = GameController::from_position(
            StandardMoveGenerator::new(),
            GameMode::VsAi,
            self.difficulty,
            self.starting_position,
        );
        controller.set_ai_color(self.color.opposite());
        run_game_loop(&mut controller);
    }
}
