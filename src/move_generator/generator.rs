//! Reference rules implementation: a mailbox legal-move generator.

use crate::board::castle_rights::{kingside_rights, queenside_rights};
use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::square::Square;
use crate::board::Position;
use crate::chess_move::Move;
use crate::move_generator::{GameEnding, MoveGenerator};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMoveGenerator;

impl StandardMoveGenerator {
    pub fn new() -> Self {
        Default::default()
    }
}

impl MoveGenerator for StandardMoveGenerator {
    fn legal_moves(&self, position: &Position) -> Vec<Move> {
        let color = position.turn();
        let mut scratch = position.clone();
        let mut legal = Vec::with_capacity(32);

        for mv in pseudo_legal_moves(position, color) {
            let applied = match scratch.apply_scoped(&mv) {
                Ok(applied) => applied,
                Err(_) => continue,
            };
            let king_safe = match applied.find_king(color) {
                Some(king) => !square_attacked(&applied, king, color.opposite()),
                // King-less side cannot be in check; useful for reduced
                // test positions.
                None => true,
            };
            if king_safe {
                legal.push(mv);
            }
        }

        legal
    }

    fn is_check(&self, position: &Position) -> bool {
        let color = position.turn();
        match position.find_king(color) {
            Some(king) => square_attacked(position, king, color.opposite()),
            None => false,
        }
    }

    fn game_ending(&self, position: &Position) -> Option<GameEnding> {
        // Mate and stalemate outrank the draw rules: a mate delivered on the
        // hundredth halfmove is still mate.
        if self.legal_moves(position).is_empty() {
            return Some(if self.is_check(position) {
                GameEnding::Checkmate {
                    winner: position.turn().opposite(),
                }
            } else {
                GameEnding::Stalemate
            });
        }
        if insufficient_material(position) || position.halfmove_clock() >= 100 {
            return Some(GameEnding::DrawByRule);
        }
        None
    }
}

fn pseudo_legal_moves(position: &Position, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);

    for (square, piece, piece_color) in position.occupied_squares() {
        if piece_color != color {
            continue;
        }
        match piece {
            Piece::Pawn => pawn_moves(position, square, color, &mut moves),
            Piece::Knight => step_moves(position, square, color, &KNIGHT_OFFSETS, &mut moves),
            Piece::Bishop => {
                sliding_moves(position, square, color, &BISHOP_DIRECTIONS, &mut moves)
            }
            Piece::Rook => sliding_moves(position, square, color, &ROOK_DIRECTIONS, &mut moves),
            Piece::Queen => {
                sliding_moves(position, square, color, &BISHOP_DIRECTIONS, &mut moves);
                sliding_moves(position, square, color, &ROOK_DIRECTIONS, &mut moves);
            }
            Piece::King => {
                step_moves(position, square, color, &KING_OFFSETS, &mut moves);
                castle_moves(position, color, &mut moves);
            }
        }
    }

    moves
}

fn step_moves(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(file_delta, rank_delta) in offsets {
        let to = match from.offset(file_delta, rank_delta) {
            Some(to) => to,
            None => continue,
        };
        match position.get(to) {
            None => moves.push(Move::new(from, to)),
            Some((victim, victim_color)) if victim_color != color => {
                moves.push(Move::capture(from, to, victim))
            }
            Some(_) => {}
        }
    }
}

fn sliding_moves(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(file_delta, rank_delta) in directions {
        let mut current = from;
        while let Some(to) = current.offset(file_delta, rank_delta) {
            match position.get(to) {
                None => moves.push(Move::new(from, to)),
                Some((victim, victim_color)) => {
                    if victim_color != color {
                        moves.push(Move::capture(from, to, victim));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

fn pawn_moves(position: &Position, from: Square, color: Color, moves: &mut Vec<Move>) {
    let forward: i8 = match color {
        Color::White => 1,
        Color::Black => -1,
    };
    let (start_rank, promotion_rank) = match color {
        Color::White => (1, 7),
        Color::Black => (6, 0),
    };

    if let Some(one) = from.offset(0, forward) {
        if position.get(one).is_none() {
            if one.rank() == promotion_rank {
                push_promotions(from, one, None, moves);
            } else {
                moves.push(Move::new(from, one));
                if from.rank() == start_rank {
                    if let Some(two) = from.offset(0, 2 * forward) {
                        if position.get(two).is_none() {
                            moves.push(Move::new(from, two));
                        }
                    }
                }
            }
        }
    }

    for file_delta in [-1, 1] {
        let to = match from.offset(file_delta, forward) {
            Some(to) => to,
            None => continue,
        };
        match position.get(to) {
            Some((victim, victim_color)) if victim_color != color => {
                if to.rank() == promotion_rank {
                    push_promotions(from, to, Some(victim), moves);
                } else {
                    moves.push(Move::capture(from, to, victim));
                }
            }
            None if position.en_passant_target() == Some(to) => {
                moves.push(Move::en_passant(from, to));
            }
            _ => {}
        }
    }
}

fn push_promotions(from: Square, to: Square, victim: Option<Piece>, moves: &mut Vec<Move>) {
    for &promoted in &PROMOTION_PIECES {
        moves.push(Move::promote(from, to, promoted, victim));
    }
}

fn castle_moves(position: &Position, color: Color, moves: &mut Vec<Move>) {
    let rank = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    let king_square = Square::from_rank_file(rank, 4);
    if position.get(king_square) != Some((Piece::King, color)) {
        return;
    }
    let opponent = color.opposite();
    // Castling out of check is never legal.
    if square_attacked(position, king_square, opponent) {
        return;
    }

    if position.castle_rights() & kingside_rights(color) != 0 {
        let transit = Square::from_rank_file(rank, 5);
        let target = Square::from_rank_file(rank, 6);
        let rook = Square::from_rank_file(rank, 7);
        if position.get(transit).is_none()
            && position.get(target).is_none()
            && position.get(rook) == Some((Piece::Rook, color))
            && !square_attacked(position, transit, opponent)
        {
            moves.push(Move::castle(king_square, target));
        }
    }

    if position.castle_rights() & queenside_rights(color) != 0 {
        let knight_home = Square::from_rank_file(rank, 1);
        let target = Square::from_rank_file(rank, 2);
        let transit = Square::from_rank_file(rank, 3);
        let rook = Square::from_rank_file(rank, 0);
        if position.get(knight_home).is_none()
            && position.get(target).is_none()
            && position.get(transit).is_none()
            && position.get(rook) == Some((Piece::Rook, color))
            && !square_attacked(position, transit, opponent)
        {
            moves.push(Move::castle(king_square, target));
        }
    }
}

/// Whether `square` is attacked by any piece of color `by`.
fn square_attacked(position: &Position, square: Square, by: Color) -> bool {
    let forward: i8 = match by {
        Color::White => 1,
        Color::Black => -1,
    };
    for file_delta in [-1, 1] {
        if let Some(from) = square.offset(file_delta, -forward) {
            if position.get(from) == Some((Piece::Pawn, by)) {
                return true;
            }
        }
    }

    for &(file_delta, rank_delta) in &KNIGHT_OFFSETS {
        if let Some(from) = square.offset(file_delta, rank_delta) {
            if position.get(from) == Some((Piece::Knight, by)) {
                return true;
            }
        }
    }

    for &(file_delta, rank_delta) in &KING_OFFSETS {
        if let Some(from) = square.offset(file_delta, rank_delta) {
            if position.get(from) == Some((Piece::King, by)) {
                return true;
            }
        }
    }

    ray_attack(position, square, by, &ROOK_DIRECTIONS, Piece::Rook)
        || ray_attack(position, square, by, &BISHOP_DIRECTIONS, Piece::Bishop)
}

fn ray_attack(
    position: &Position,
    square: Square,
    by: Color,
    directions: &[(i8, i8)],
    slider: Piece,
) -> bool {
    for &(file_delta, rank_delta) in directions {
        let mut current = square;
        while let Some(next) = current.offset(file_delta, rank_delta) {
            match position.get(next) {
                None => current = next,
                Some((piece, color)) => {
                    if color == by && (piece == slider || piece == Piece::Queen) {
                        return true;
                    }
                    break;
                }
            }
        }
    }
    false
}

/// Neither side can force mate: bare kings, or a lone minor piece beside them.
fn insufficient_material(position: &Position) -> bool {
    let mut minor_pieces = 0;
    for (_, piece, _) in position.occupied_squares() {
        match piece {
            Piece::King => {}
            Piece::Bishop | Piece::Knight => minor_pieces += 1,
            _ => return false,
        }
    }
    minor_pieces <= 1
}
