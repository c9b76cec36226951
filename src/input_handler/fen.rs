//! FEN (Forsyth–Edwards Notation) parsing and serialization, used for CLI
//! start positions and test fixtures.

use std::str::FromStr;

use thiserror::Error;

use crate::board::castle_rights::*;
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::square::Square;
use crate::board::Position;

#[derive(Error, Debug)]
pub enum FenParseError {
    #[error("wrong number of fields: 6 expected, {field_count:?} given")]
    WrongNumberOfFields { field_count: usize },
    #[error("invalid piece character: {invalid_character:?}")]
    InvalidPieceCharacter { invalid_character: char },
    #[error("wrong number of ranks: 8 expected, {rank_count:?} given")]
    InvalidRankCount { rank_count: usize },
    #[error("rank too long: {invalid_rank:?}")]
    InvalidRankLength { invalid_rank: String },
    #[error("rank incomplete: {incomplete_rank:?}")]
    IncompleteRank { incomplete_rank: String },
    #[error("error placing piece: {board_error}")]
    ErrorPlacingPiece { board_error: BoardError },
    #[error("invalid color: {invalid_color:?}")]
    InvalidColor { invalid_color: String },
    #[error("invalid castling rights: {invalid_castling:?}")]
    InvalidCastlingRights { invalid_castling: char },
    #[error("invalid en passant target: {value:?}")]
    InvalidEnPassant { value: String },
    #[error("invalid halfmove clock: {invalid_clock:?}")]
    InvalidHalfmoveClock { invalid_clock: String },
    #[error("invalid fullmove number: {invalid_number:?}")]
    InvalidFullmoveNumber { invalid_number: String },
}

type FenResult<T> = Result<T, FenParseError>;

pub const STARTING_POSITION_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parses the six FEN fields (piece placement, active color, castling
/// rights, en passant target, halfmove clock, fullmove number) into a
/// [`Position`].
pub fn parse_fen(fen: &str) -> FenResult<Position> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 6 {
        return Err(FenParseError::WrongNumberOfFields {
            field_count: parts.len(),
        });
    }

    let mut position = Position::new();
    parse_piece_placement(&mut position, parts[0])?;
    parse_active_color(&mut position, parts[1])?;
    parse_castle_rights(&mut position, parts[2])?;
    parse_en_passant(&mut position, parts[3])?;
    parse_halfmove_clock(&mut position, parts[4])?;
    parse_fullmove_number(&mut position, parts[5])?;

    Ok(position)
}

fn parse_piece_placement(position: &mut Position, placement: &str) -> FenResult<()> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::InvalidRankCount {
            rank_count: ranks.len(),
        });
    }

    // FEN lists ranks top-down, from rank 8 to rank 1.
    for (rank_idx, rank) in ranks.iter().enumerate() {
        parse_rank(position, rank, 7 - rank_idx as u8)?;
    }
    Ok(())
}

fn parse_rank(position: &mut Position, rank: &str, rank_number: u8) -> FenResult<()> {
    let mut file = 0u8;

    for c in rank.chars() {
        if file >= 8 {
            return Err(FenParseError::InvalidRankLength {
                invalid_rank: rank.to_string(),
            });
        }

        if let Some(empty_squares) = c.to_digit(10) {
            file += empty_squares as u8;
        } else {
            let (piece, color) = Piece::from_fen(c).ok_or(
                FenParseError::InvalidPieceCharacter {
                    invalid_character: c,
                },
            )?;
            position
                .put(Square::from_rank_file(rank_number, file), piece, color)
                .map_err(|board_error| FenParseError::ErrorPlacingPiece { board_error })?;
            file += 1;
        }
    }

    if file != 8 {
        return Err(FenParseError::IncompleteRank {
            incomplete_rank: rank.to_string(),
        });
    }
    Ok(())
}

fn parse_active_color(position: &mut Position, active_color: &str) -> FenResult<()> {
    match active_color {
        "w" => position.set_turn(Color::White),
        "b" => position.set_turn(Color::Black),
        _ => {
            return Err(FenParseError::InvalidColor {
                invalid_color: active_color.to_string(),
            })
        }
    }
    Ok(())
}

fn parse_castle_rights(position: &mut Position, castle_rights: &str) -> FenResult<()> {
    if castle_rights == "-" {
        position.lose_castle_rights(ALL_CASTLE_RIGHTS);
        return Ok(());
    }

    let mut rights = NO_CASTLE_RIGHTS;
    for c in castle_rights.chars() {
        rights |= match c {
            'K' => WHITE_KINGSIDE_RIGHTS,
            'Q' => WHITE_QUEENSIDE_RIGHTS,
            'k' => BLACK_KINGSIDE_RIGHTS,
            'q' => BLACK_QUEENSIDE_RIGHTS,
            _ => {
                return Err(FenParseError::InvalidCastlingRights {
                    invalid_castling: c,
                })
            }
        };
    }
    position.lose_castle_rights(!rights);
    Ok(())
}

fn parse_en_passant(position: &mut Position, en_passant: &str) -> FenResult<()> {
    if en_passant == "-" {
        return Ok(());
    }

    let square =
        Square::from_algebraic(en_passant).ok_or_else(|| FenParseError::InvalidEnPassant {
            value: en_passant.to_string(),
        })?;
    position.set_en_passant_target(Some(square));
    Ok(())
}

fn parse_halfmove_clock(position: &mut Position, halfmove_clock: &str) -> FenResult<()> {
    let clock = halfmove_clock
        .parse::<u16>()
        .map_err(|_| FenParseError::InvalidHalfmoveClock {
            invalid_clock: halfmove_clock.to_string(),
        })?;
    position.set_halfmove_clock(clock);
    Ok(())
}

fn parse_fullmove_number(position: &mut Position, fullmove_number: &str) -> FenResult<()> {
    let number = fullmove_number
        .parse::<u16>()
        .map_err(|_| FenParseError::InvalidFullmoveNumber {
            invalid_number: fullmove_number.to_string(),
        })?;
    position.set_fullmove_number(number);
    Ok(())
}

/// Serializes a position back to FEN.
pub fn to_fen(position: &Position) -> String {
    let mut fen = String::with_capacity(90);

    for rank in (0..8u8).rev() {
        let mut empty_squares = 0;
        for file in 0..8u8 {
            match position.get(Square::from_rank_file(rank, file)) {
                Some((piece, color)) => {
                    if empty_squares > 0 {
                        fen.push_str(&empty_squares.to_string());
                        empty_squares = 0;
                    }
                    fen.push(piece.to_fen(color));
                }
                None => empty_squares += 1,
            }
        }
        if empty_squares > 0 {
            fen.push_str(&empty_squares.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match position.turn() {
        Color::White => 'w',
        Color::Black => 'b',
    });

    fen.push(' ');
    let rights = position.castle_rights();
    if rights == NO_CASTLE_RIGHTS {
        fen.push('-');
    } else {
        for (mask, c) in [
            (WHITE_KINGSIDE_RIGHTS, 'K'),
            (WHITE_QUEENSIDE_RIGHTS, 'Q'),
            (BLACK_KINGSIDE_RIGHTS, 'k'),
            (BLACK_QUEENSIDE_RIGHTS, 'q'),
        ] {
            if rights & mask != 0 {
                fen.push(c);
            }
        }
    }

    fen.push(' ');
    match position.en_passant_target() {
        Some(square) => fen.push_str(&square.to_algebraic()),
        None => fen.push('-'),
    }

    fen.push_str(&format!(
        " {} {}",
        position.halfmove_clock(),
        position.fullmove_number()
    ));
    fen
}

impl FromStr for Position {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::*;

    #[test]
    fn test_parse_starting_position() {
        let position: Position = STARTING_POSITION_FEN.parse().unwrap();
        assert_eq!(position, Position::starting_position());
    }

    #[test]
    fn test_parse_complex_position() {
        let fen = "r1bqk2r/ppp2ppp/2n2n2/2bpp3/4P3/2PP1N2/PP1N1PPP/R1BQKB1R b KQkq - 0 6";
        let position = parse_fen(fen).unwrap();
        assert_eq!(position.turn(), Color::Black);
        assert_eq!(position.get(E4), Some((Piece::Pawn, Color::White)));
        assert_eq!(position.get(C5), Some((Piece::Bishop, Color::Black)));
        assert_eq!(position.castle_rights(), ALL_CASTLE_RIGHTS);
        assert_eq!(position.fullmove_number(), 6);
    }

    #[test]
    fn test_parse_en_passant_and_partial_rights() {
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w Kq d6 0 2";
        let position = parse_fen(fen).unwrap();
        assert_eq!(position.en_passant_target(), Some(D6));
        assert_eq!(
            position.castle_rights(),
            WHITE_KINGSIDE_RIGHTS | BLACK_QUEENSIDE_RIGHTS
        );
    }

    #[test]
    fn test_round_trip() {
        for fen in [
            STARTING_POSITION_FEN,
            "r1bqk2r/ppp2ppp/2n2n2/2bpp3/4P3/2PP1N2/PP1N1PPP/R1BQKB1R b KQkq - 0 6",
            "8/5k2/8/8/8/8/5K2/6R1 w - - 12 40",
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
        ] {
            let position = parse_fen(fen).unwrap();
            assert_eq!(to_fen(&position), fen);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Err(FenParseError::WrongNumberOfFields { field_count: 4 })
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1"),
            Err(FenParseError::InvalidRankCount { rank_count: 7 })
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1"),
            Err(FenParseError::InvalidPieceCharacter {
                invalid_character: 'X'
            })
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenParseError::InvalidColor { .. })
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1"),
            Err(FenParseError::InvalidCastlingRights {
                invalid_castling: 'x'
            })
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1"),
            Err(FenParseError::InvalidEnPassant { .. })
        ));
    }
}
