//! Negamax search with alpha-beta pruning and a quiescence extension at the
//! horizon. The searcher owns no position state: it mutates the caller's
//! [`Position`] through scoped apply guards, so the position it returns to
//! the caller is bit-for-bit the position it was given.

use log::debug;
use thiserror::Error;

use crate::board::error::BoardError;
use crate::board::Position;
use crate::chess_move::Move;
use crate::evaluate::{self, MATE_SCORE};
use crate::move_generator::{GameEnding, MoveGenerator};

pub mod difficulty;
pub mod move_orderer;

pub use difficulty::{Difficulty, DifficultyProfile, ParseDifficultyError};

use self::move_orderer::order_moves;

/// The outcome of one search: the move to play, the score the searcher
/// expects after playing it (positive favors the side to move), and how many
/// nodes were visited getting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i16,
    pub nodes: u64,
}

#[derive(Error, Debug)]
pub enum SearchError {
    /// The game is already over at the root; the searcher never guesses.
    #[error("no legal moves at the search root")]
    NoLegalMovesAtRoot,
    #[error("move generator produced an unplayable move: {0}")]
    Board(#[from] BoardError),
}

#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Default::default()
    }

    /// Picks the best move for the side to move. Identical inputs always
    /// produce identical results: move ordering is deterministic and root
    /// ties resolve to the earliest-ordered move.
    pub fn search<G: MoveGenerator>(
        &mut self,
        position: &mut Position,
        generator: &G,
        profile: &DifficultyProfile,
    ) -> Result<SearchResult, SearchError> {
        self.nodes = 0;

        let mut moves = generator.legal_moves(position);
        if moves.is_empty() {
            return Err(SearchError::NoLegalMovesAtRoot);
        }
        order_moves(&mut moves, position);

        let mut best_move = moves[0];
        let mut alpha = -i16::MAX;
        let beta = i16::MAX;

        for mv in &moves {
            let score = {
                let mut applied = position.apply_scoped(mv)?;
                -self.negamax(
                    &mut *applied,
                    generator,
                    profile,
                    profile.depth.saturating_sub(1),
                    1,
                    -beta,
                    -alpha,
                )?
            };
            debug!("root candidate {} scored {}", mv, score);

            if score > alpha {
                alpha = score;
                best_move = *mv;
            }
        }

        debug!(
            "search depth {} settled on {} (score {}, {} nodes)",
            profile.depth, best_move, alpha, self.nodes
        );
        Ok(SearchResult {
            best_move,
            score: alpha,
            nodes: self.nodes,
        })
    }

    fn negamax<G: MoveGenerator>(
        &mut self,
        position: &mut Position,
        generator: &G,
        profile: &DifficultyProfile,
        depth: u8,
        ply: u8,
        mut alpha: i16,
        beta: i16,
    ) -> Result<i16, SearchError> {
        self.nodes += 1;

        if let Some(ending) = generator.game_ending(position) {
            return Ok(match ending {
                // The side to move is the one mated. Subtracting the ply
                // makes nearer mates score higher, so the searcher never
                // shuffles pieces when a forced mate is on the board.
                GameEnding::Checkmate { .. } => -(MATE_SCORE - ply as i16),
                GameEnding::Stalemate | GameEnding::DrawByRule => 0,
            });
        }

        if depth == 0 {
            return self.quiescence(
                position,
                generator,
                profile,
                profile.quiescence_depth,
                ply,
                alpha,
                beta,
            );
        }

        let mut moves = generator.legal_moves(position);
        order_moves(&mut moves, position);

        for mv in &moves {
            let score = {
                let mut applied = position.apply_scoped(mv)?;
                -self.negamax(
                    &mut *applied,
                    generator,
                    profile,
                    depth - 1,
                    ply + 1,
                    -beta,
                    -alpha,
                )?
            };

            if score >= beta {
                return Ok(beta);
            }
            if score > alpha {
                alpha = score;
            }
        }

        Ok(alpha)
    }

    /// Extends the search past the horizon along noisy lines only, so the
    /// static evaluation is never taken in the middle of a capture sequence.
    /// The stand-pat score acts as a lower bound: the side to move may always
    /// decline the remaining captures.
    fn quiescence<G: MoveGenerator>(
        &mut self,
        position: &mut Position,
        generator: &G,
        profile: &DifficultyProfile,
        depth: u8,
        ply: u8,
        mut alpha: i16,
        beta: i16,
    ) -> Result<i16, SearchError> {
        self.nodes += 1;

        let stand_pat =
            position.turn().sign() * evaluate::score(position, generator, &profile.weights);
        if depth == 0 {
            return Ok(stand_pat);
        }
        if stand_pat >= beta {
            return Ok(beta);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut noisy = Vec::new();
        for mv in generator.legal_moves(position) {
            if mv.is_capture() || mv.promotion().is_some() {
                noisy.push(mv);
            } else if profile.quiesce_checks {
                let gives_check = {
                    let applied = position.apply_scoped(&mv)?;
                    generator.is_check(&applied)
                };
                if gives_check {
                    noisy.push(mv);
                }
            }
        }
        order_moves(&mut noisy, position);

        for mv in &noisy {
            let score = {
                let mut applied = position.apply_scoped(mv)?;
                -self.quiescence(
                    &mut *applied,
                    generator,
                    profile,
                    depth - 1,
                    ply + 1,
                    -beta,
                    -alpha,
                )?
            };

            if score >= beta {
                return Ok(beta);
            }
            if score > alpha {
                alpha = score;
            }
        }

        Ok(alpha)
    }
}
