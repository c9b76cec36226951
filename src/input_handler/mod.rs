//! Terminal input parsing for the interactive game loop.

use std::io;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::board::piece::Piece;
use crate::board::square::Square;

pub mod fen;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("io error: {error:?}")]
    IoError { error: String },
    #[error("invalid input: {input:?}")]
    InvalidInput { input: String },
}

/// One line of player input, already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveInput {
    /// Coordinate notation: "e2e4", or "a7a8q" with a promotion piece.
    Coordinate {
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    },
    Undo,
    Restart,
    Quit,
}

static COORDINATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^([a-h][1-8])([a-h][1-8])([nbrq])?$").unwrap());

/// Reads and parses one line from stdin.
pub fn read_player_input() -> Result<MoveInput, InputError> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(_n) => parse_move_input(input.trim()),
        Err(error) => Err(InputError::IoError {
            error: error.to_string(),
        }),
    }
}

pub fn parse_move_input(raw: &str) -> Result<MoveInput, InputError> {
    match raw.to_ascii_lowercase().as_str() {
        "undo" | "u" => return Ok(MoveInput::Undo),
        "restart" | "new" => return Ok(MoveInput::Restart),
        "quit" | "q" | "exit" => return Ok(MoveInput::Quit),
        _ => {}
    }

    let caps = COORDINATE_RE
        .captures(raw)
        .ok_or_else(|| InputError::InvalidInput {
            input: raw.to_string(),
        })?;

    // The regex guarantees both squares parse.
    let from = Square::from_algebraic(caps.get(1).unwrap().as_str()).unwrap();
    let to = Square::from_algebraic(caps.get(2).unwrap().as_str()).unwrap();
    let promotion = caps.get(3).map(|m| {
        let c = m.as_str().chars().next().unwrap();
        Piece::from_fen(c).unwrap().0
    });

    Ok(MoveInput::Coordinate {
        from,
        to,
        promotion,
    })
}
