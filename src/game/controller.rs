//! The game state machine. The controller is the only writer of the position
//! and the history; everything a front end does goes through the commands
//! here, and everything it learns comes back as a [`TurnReport`] or a state
//! snapshot.

use log::info;
use smallvec::SmallVec;
use thiserror::Error;

use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::square::Square;
use crate::board::Position;
use crate::chess_move::Move;
use crate::evaluate;
use crate::game::history::MoveHistory;
use crate::game::GameMode;
use crate::move_generator::{GameEnding, MoveGenerator};
use crate::searcher::{Difficulty, SearchError, Searcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlState {
    AwaitingPlayerMove,
    /// A piece is selected and its legal destinations are on offer.
    PieceSelected {
        square: Square,
        targets: Vec<Square>,
    },
    AiThinking,
    GameOver(GameEnding),
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("that move is not legal")]
    IllegalMoveAttempted,
    #[error("input is not accepted while the engine is thinking")]
    NotYourTurn,
    #[error("the engine is not on move")]
    EngineNotOnMove,
    #[error("the game is already over")]
    GameAlreadyOver,
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// What the presenter gets after every applied move. The score is
/// white-positive for player moves and side-to-move relative for engine
/// moves, matching what each side cares about when the line is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub applied_move: Move,
    pub score: i16,
    pub nodes: u64,
    pub game_over: Option<GameEnding>,
}

pub struct GameController<G> {
    position: Position,
    initial_position: Position,
    generator: G,
    searcher: Searcher,
    history: MoveHistory,
    mode: GameMode,
    difficulty: Difficulty,
    ai_color: Color,
    state: ControlState,
}

impl<G: MoveGenerator> GameController<G> {
    pub fn new(generator: G, mode: GameMode, difficulty: Difficulty) -> Self {
        Self::from_position(generator, mode, difficulty, Position::starting_position())
    }

    pub fn from_position(
        generator: G,
        mode: GameMode,
        difficulty: Difficulty,
        position: Position,
    ) -> Self {
        let mut controller = Self {
            initial_position: position.clone(),
            position,
            generator,
            searcher: Searcher::new(),
            history: MoveHistory::new(),
            mode,
            difficulty,
            ai_color: Color::Black,
            state: ControlState::AwaitingPlayerMove,
        };
        controller.state = match controller.generator.game_ending(&controller.position) {
            Some(ending) => ControlState::GameOver(ending),
            None => controller.resting_state(),
        };
        controller
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn ai_color(&self) -> Color {
        self.ai_color
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    /// Assigns the engine's side. When the engine ends up on move, the state
    /// switches to thinking so the front end knows to call [`Self::think`].
    pub fn set_ai_color(&mut self, color: Color) {
        self.ai_color = color;
        if matches!(
            self.state,
            ControlState::AwaitingPlayerMove | ControlState::AiThinking
        ) {
            self.state = self.resting_state();
        }
    }

    /// Square-by-square input: selects a piece, deselects it, reselects
    /// another, or completes a move when a selected piece's legal target is
    /// chosen. Completing a move returns its report.
    pub fn select_square(&mut self, square: Square) -> Result<Option<TurnReport>, GameError> {
        match self.state.clone() {
            ControlState::GameOver(_) => Err(GameError::GameAlreadyOver),
            ControlState::AiThinking => Err(GameError::NotYourTurn),
            ControlState::AwaitingPlayerMove => {
                self.try_select(square);
                Ok(None)
            }
            ControlState::PieceSelected { square: selected, targets } => {
                if selected == square {
                    self.state = ControlState::AwaitingPlayerMove;
                    Ok(None)
                } else if targets.contains(&square) {
                    self.play_player_move(selected, square, None).map(Some)
                } else {
                    self.try_select(square);
                    Ok(None)
                }
            }
        }
    }

    /// Text input ("e2e4", "a7a8q"). An omitted promotion piece defaults to
    /// a queen.
    pub fn submit_move_by_squares(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<TurnReport, GameError> {
        match self.state {
            ControlState::GameOver(_) => Err(GameError::GameAlreadyOver),
            ControlState::AiThinking => Err(GameError::NotYourTurn),
            _ => self.play_player_move(from, to, promotion),
        }
    }

    /// Runs the engine's turn synchronously. Valid only in the thinking
    /// state, which the state machine enters only on non-terminal positions.
    pub fn think(&mut self) -> Result<TurnReport, GameError> {
        if !matches!(self.state, ControlState::AiThinking) {
            return Err(GameError::EngineNotOnMove);
        }

        let profile = self.difficulty.profile();
        let result = self
            .searcher
            .search(&mut self.position, &self.generator, &profile)?;

        let undo = self.position.apply(&result.best_move)?;
        self.history.record(result.best_move, undo);
        self.history.close_turn();
        info!(
            "engine played {} (score {}, {} nodes at {})",
            result.best_move, result.score, result.nodes, self.difficulty
        );

        let ending = self.generator.game_ending(&self.position);
        self.state = match ending {
            Some(ending) => ControlState::GameOver(ending),
            None => ControlState::AwaitingPlayerMove,
        };

        Ok(TurnReport {
            applied_move: result.best_move,
            score: result.score,
            nodes: result.nodes,
            game_over: ending,
        })
    }

    /// Reverts the most recent completed turn: both moves of a player+engine
    /// turn, one move in two-player games. Returns the reverted moves, empty
    /// when there is nothing that can be undone. A finished game cannot be
    /// undone back into play; `restart` is the only exit from game over.
    pub fn undo(&mut self) -> SmallVec<[Move; 2]> {
        if matches!(self.state, ControlState::GameOver(_)) {
            return SmallVec::new();
        }
        let reverted = self.history.undo_last_turn(&mut self.position);
        if !reverted.is_empty() {
            info!("reverted {} move(s)", reverted.len());
            self.state = self.resting_state();
        }
        reverted
    }

    /// Resets to the initial position and clears the history.
    pub fn restart(&mut self) {
        self.position = self.initial_position.clone();
        self.history.clear();
        self.state = self.resting_state();
        info!("game restarted");
    }

    fn resting_state(&self) -> ControlState {
        if self.mode == GameMode::VsAi && self.position.turn() == self.ai_color {
            ControlState::AiThinking
        } else {
            ControlState::AwaitingPlayerMove
        }
    }

    fn try_select(&mut self, square: Square) {
        let own_piece = self
            .position
            .get(square)
            .map_or(false, |(_, color)| color == self.position.turn());

        if own_piece {
            let mut targets: Vec<Square> = self
                .generator
                .legal_moves(&self.position)
                .iter()
                .filter(|mv| mv.from() == square)
                .map(|mv| mv.to())
                .collect();
            // The four promotion moves share a target square.
            targets.dedup();
            self.state = ControlState::PieceSelected { square, targets };
        } else {
            self.state = ControlState::AwaitingPlayerMove;
        }
    }

    fn play_player_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<TurnReport, GameError> {
        let mv = self.resolve_move(from, to, promotion)?;

        let undo = self.position.apply(&mv)?;
        self.history.record(mv, undo);
        info!("player played {}", mv);

        let ending = self.generator.game_ending(&self.position);
        self.state = match ending {
            Some(ending) => {
                self.history.close_turn();
                ControlState::GameOver(ending)
            }
            None => match self.mode {
                GameMode::TwoPlayer => {
                    self.history.close_turn();
                    ControlState::AwaitingPlayerMove
                }
                GameMode::VsAi => ControlState::AiThinking,
            },
        };

        let score = evaluate::score(
            &self.position,
            &self.generator,
            &self.difficulty.profile().weights,
        );
        Ok(TurnReport {
            applied_move: mv,
            score,
            nodes: 0,
            game_over: ending,
        })
    }

    fn resolve_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Move, GameError> {
        let matching: Vec<Move> = self
            .generator
            .legal_moves(&self.position)
            .into_iter()
            .filter(|mv| mv.from() == from && mv.to() == to)
            .collect();

        match matching.first() {
            None => Err(GameError::IllegalMoveAttempted),
            Some(first) if first.promotion().is_some() => {
                let promoted = promotion.unwrap_or(Piece::Queen);
                matching
                    .iter()
                    .find(|mv| mv.promotion() == Some(promoted))
                    .copied()
                    .ok_or(GameError::IllegalMoveAttempted)
            }
            Some(first) => {
                if promotion.is_some() {
                    return Err(GameError::IllegalMoveAttempted);
                }
                Ok(*first)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::*;
    use crate::move_generator::StandardMoveGenerator;

    fn two_player() -> GameController<StandardMoveGenerator> {
        GameController::new(
            StandardMoveGenerator::new(),
            GameMode::TwoPlayer,
            Difficulty::Easy,
        )
    }

    fn vs_ai() -> GameController<StandardMoveGenerator> {
        GameController::new(
            StandardMoveGenerator::new(),
            GameMode::VsAi,
            Difficulty::Easy,
        )
    }

    #[test]
    fn test_fools_mate_reaches_game_over() {
        let mut controller = two_player();
        for (from, to) in [(F2, F3), (E7, E5), (G2, G4)] {
            let report = controller.submit_move_by_squares(from, to, None).unwrap();
            assert_eq!(report.game_over, None);
        }

        let report = controller.submit_move_by_squares(D8, H4, None).unwrap();
        assert_eq!(
            report.game_over,
            Some(GameEnding::Checkmate {
                winner: Color::Black
            })
        );
        assert!(matches!(
            controller.state(),
            ControlState::GameOver(GameEnding::Checkmate {
                winner: Color::Black
            })
        ));
        assert!(matches!(
            controller.submit_move_by_squares(E2, E4, None),
            Err(GameError::GameAlreadyOver)
        ));
    }

    #[test]
    fn test_selection_flow() {
        let mut controller = two_player();

        controller.select_square(E2).unwrap();
        match controller.state() {
            ControlState::PieceSelected { square, targets } => {
                assert_eq!(*square, E2);
                assert_eq!(targets.as_slice(), &[E3, E4]);
            }
            state => panic!("expected a selection, got {:?}", state),
        }

        // Selecting the same square again deselects.
        controller.select_square(E2).unwrap();
        assert!(matches!(
            controller.state(),
            ControlState::AwaitingPlayerMove
        ));

        // Selecting a legal target completes the move.
        controller.select_square(E2).unwrap();
        let report = controller.select_square(E4).unwrap().unwrap();
        assert_eq!(report.applied_move, Move::new(E2, E4));
        assert_eq!(controller.turn(), Color::Black);
    }

    #[test]
    fn test_selecting_another_piece_reselects() {
        let mut controller = two_player();
        controller.select_square(E2).unwrap();
        controller.select_square(G1).unwrap();
        match controller.state() {
            ControlState::PieceSelected { square, .. } => assert_eq!(*square, G1),
            state => panic!("expected a selection, got {:?}", state),
        }
    }

    #[test]
    fn test_selecting_an_empty_square_deselects() {
        let mut controller = two_player();
        controller.select_square(E2).unwrap();
        controller.select_square(E5).unwrap();
        assert!(matches!(
            controller.state(),
            ControlState::AwaitingPlayerMove
        ));
    }

    #[test]
    fn test_illegal_move_is_recoverable() {
        let mut controller = two_player();
        assert!(matches!(
            controller.submit_move_by_squares(E2, E5, None),
            Err(GameError::IllegalMoveAttempted)
        ));
        // The game carries on.
        assert!(controller.submit_move_by_squares(E2, E4, None).is_ok());
    }

    #[test]
    fn test_ai_turn_is_player_move_plus_reply() {
        let mut controller = vs_ai();

        controller.submit_move_by_squares(E2, E4, None).unwrap();
        assert!(matches!(controller.state(), ControlState::AiThinking));
        assert_eq!(controller.history().len(), 1);

        // No input accepted while the engine is on move.
        assert!(matches!(
            controller.submit_move_by_squares(D2, D4, None),
            Err(GameError::NotYourTurn)
        ));
        assert!(matches!(
            controller.select_square(D2),
            Err(GameError::NotYourTurn)
        ));

        let report = controller.think().unwrap();
        assert!(report.nodes > 0);
        assert_eq!(controller.history().len(), 2);
        assert!(matches!(
            controller.state(),
            ControlState::AwaitingPlayerMove
        ));
    }

    #[test]
    fn test_undo_reverts_two_moves_in_ai_mode() {
        let mut controller = vs_ai();
        let start = controller.position().clone();

        controller.submit_move_by_squares(E2, E4, None).unwrap();
        controller.think().unwrap();

        let reverted = controller.undo();
        assert_eq!(reverted.len(), 2);
        assert_eq!(controller.position(), &start);
        assert!(controller.history().is_empty());
        assert!(matches!(
            controller.state(),
            ControlState::AwaitingPlayerMove
        ));
    }

    #[test]
    fn test_undo_reverts_one_move_in_two_player_mode() {
        let mut controller = two_player();
        let start = controller.position().clone();

        controller.submit_move_by_squares(E2, E4, None).unwrap();
        let reverted = controller.undo();
        assert_eq!(reverted.len(), 1);
        assert_eq!(controller.position(), &start);
    }

    #[test]
    fn test_undo_mid_ai_turn_is_a_noop() {
        let mut controller = vs_ai();
        controller.submit_move_by_squares(E2, E4, None).unwrap();

        assert!(controller.undo().is_empty());
        assert_eq!(controller.history().len(), 1);
        assert!(matches!(controller.state(), ControlState::AiThinking));
    }

    #[test]
    fn test_undo_rejected_after_game_over() {
        let mut controller = two_player();
        for (from, to) in [(F2, F3), (E7, E5), (G2, G4), (D8, H4)] {
            controller.submit_move_by_squares(from, to, None).unwrap();
        }
        assert!(matches!(
            controller.state(),
            ControlState::GameOver(GameEnding::Checkmate { .. })
        ));

        // The mating move stays on the board; only restart leaves game over.
        assert!(controller.undo().is_empty());
        assert_eq!(controller.history().len(), 4);
        assert!(matches!(
            controller.state(),
            ControlState::GameOver(GameEnding::Checkmate { .. })
        ));
    }

    #[test]
    fn test_undo_underflow_is_a_noop() {
        let mut controller = vs_ai();
        assert!(controller.undo().is_empty());
    }

    #[test]
    fn test_engine_opens_when_playing_white() {
        let mut controller = vs_ai();
        controller.set_ai_color(Color::White);
        assert!(matches!(controller.state(), ControlState::AiThinking));

        let report = controller.think().unwrap();
        assert_eq!(report.game_over, None);
        // The opening engine move is a complete turn on its own.
        assert_eq!(controller.history().len(), 1);
        assert!(controller.undo().len() == 1);
    }

    #[test]
    fn test_think_rejected_when_engine_not_on_move() {
        let mut controller = vs_ai();
        assert!(matches!(
            controller.think(),
            Err(GameError::EngineNotOnMove)
        ));
    }

    #[test]
    fn test_restart_resets_position_and_history() {
        let mut controller = two_player();
        let start = controller.position().clone();

        controller.submit_move_by_squares(E2, E4, None).unwrap();
        controller.submit_move_by_squares(E7, E5, None).unwrap();
        controller.restart();

        assert_eq!(controller.position(), &start);
        assert!(controller.history().is_empty());
        assert!(matches!(
            controller.state(),
            ControlState::AwaitingPlayerMove
        ));
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let position: Position = "8/P7/8/8/8/8/8/k6K w - - 0 1".parse().unwrap();
        let mut controller = GameController::from_position(
            StandardMoveGenerator::new(),
            GameMode::TwoPlayer,
            Difficulty::Easy,
            position,
        );

        let report = controller.submit_move_by_squares(A7, A8, None).unwrap();
        assert_eq!(report.applied_move.promotion(), Some(Piece::Queen));

        controller.undo();
        let report = controller
            .submit_move_by_squares(A7, A8, Some(Piece::Knight))
            .unwrap();
        assert_eq!(report.applied_move.promotion(), Some(Piece::Knight));
    }

    #[test]
    fn test_terminal_start_position_is_game_over() {
        let stalemate: Position = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let controller = GameController::from_position(
            StandardMoveGenerator::new(),
            GameMode::VsAi,
            Difficulty::Easy,
            stalemate,
        );
        assert!(matches!(
            controller.state(),
            ControlState::GameOver(GameEnding::Stalemate)
        ));
    }
}
