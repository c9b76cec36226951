//! Shared interactive game loop for the `play` and `pvp` commands.

use crate::game::controller::{ControlState, GameController, GameError, TurnReport};
use crate::game::display::GameDisplay;
use crate::input_handler::{read_player_input, InputError, MoveInput};
use crate::move_generator::StandardMoveGenerator;

pub(crate) fn run_game_loop(controller: &mut GameController<StandardMoveGenerator>) {
    let mut display = GameDisplay::new();
    let mut last_move: Option<String> = None;
    let mut stats: Option<String> = None;

    loop {
        let ending = match controller.state() {
            ControlState::GameOver(ending) => Some(*ending),
            _ => None,
        };
        display.render_game_state(
            controller.position(),
            last_move.as_deref(),
            stats.as_deref(),
            ending,
        );
        if ending.is_some() {
            return;
        }

        if matches!(controller.state(), ControlState::AiThinking) {
            match controller.think() {
                Ok(report) => {
                    last_move = Some(report.applied_move.to_string());
                    stats = Some(format_engine_stats(controller, &report));
                }
                Err(error) => {
                    eprintln!("engine error: {}", error);
                    return;
                }
            }
            continue;
        }

        println!("Enter a move (e.g. e2e4 or a7a8q), `undo`, `restart`, or `quit`:");
        let input = match read_player_input() {
            Ok(input) => input,
            Err(InputError::InvalidInput { input }) => {
                println!("Unrecognized input: {:?}", input);
                continue;
            }
            Err(error) => {
                eprintln!("input error: {}", error);
                return;
            }
        };

        match input {
            MoveInput::Coordinate {
                from,
                to,
                promotion,
            } => match controller.submit_move_by_squares(from, to, promotion) {
                Ok(report) => {
                    last_move = Some(report.applied_move.to_string());
                    stats = None;
                }
                Err(GameError::IllegalMoveAttempted) => {
                    println!("That move is not legal here.");
                }
                Err(error) => {
                    eprintln!("game error: {}", error);
                    return;
                }
            },
            MoveInput::Undo => {
                if controller.undo().is_empty() {
                    println!("Nothing to undo.");
                } else {
                    last_move = controller.history().last_move().map(|mv| mv.to_string());
                    stats = None;
                }
            }
            MoveInput::Restart => {
                controller.restart();
                last_move = None;
                stats = None;
            }
            MoveInput::Quit => return,
        }
    }
}

fn format_engine_stats(
    controller: &GameController<StandardMoveGenerator>,
    report: &TurnReport,
) -> String {
    format!(
        "Engine ({}): {} (score {}, {} nodes searched)",
        controller.difficulty(),
        report.applied_move,
        report.score,
        report.nodes
    )
}
