pub mod castle_rights;
pub mod color;
pub mod display;
pub mod error;
pub mod piece;
pub mod square;

use std::ops::{Deref, DerefMut};

use castle_rights::{
    both_rights, kingside_rights, queenside_rights, CastleRights, ALL_CASTLE_RIGHTS,
};
use color::Color;
use error::BoardError;
use piece::Piece;
use square::Square;

use crate::chess_move::Move;

/// Snapshot of board state at a single point in the game: piece placement,
/// side to move, castle rights, en passant target, and move clocks. There is
/// one live `Position` per game; it is mutated only through [`Position::apply`]
/// and [`Position::undo`] (or the scoped guard returned by
/// [`Position::apply_scoped`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    squares: [Option<(Piece, Color)>; 64],
    turn: Color,
    castle_rights: CastleRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
}

/// Everything [`Position::undo`] needs to reverse one applied move: the
/// captured piece (if any) with the square it stood on, plus the state fields
/// that `apply` overwrites unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveUndo {
    captured: Option<(Piece, Square)>,
    castle_rights: CastleRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u16,
}

impl MoveUndo {
    pub fn captured(&self) -> Option<(Piece, Square)> {
        self.captured
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            squares: [None; 64],
            turn: Color::White,
            castle_rights: ALL_CASTLE_RIGHTS,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Position {
    /// An empty board with White to move and full castle rights.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn starting_position() -> Self {
        let mut position = Self::new();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in back_rank.iter().enumerate() {
            let file = file as u8;
            position.squares[Square::from_rank_file(0, file).index()] =
                Some((piece, Color::White));
            position.squares[Square::from_rank_file(1, file).index()] =
                Some((Piece::Pawn, Color::White));
            position.squares[Square::from_rank_file(6, file).index()] =
                Some((Piece::Pawn, Color::Black));
            position.squares[Square::from_rank_file(7, file).index()] =
                Some((piece, Color::Black));
        }
        position
    }

    pub fn get(&self, square: Square) -> Option<(Piece, Color)> {
        self.squares[square.index()]
    }

    pub fn put(&mut self, square: Square, piece: Piece, color: Color) -> Result<(), BoardError> {
        if self.squares[square.index()].is_some() {
            return Err(BoardError::SquareOccupied { square });
        }
        self.squares[square.index()] = Some((piece, color));
        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<(Piece, Color)> {
        self.squares[square.index()].take()
    }

    /// Iterates over all occupied squares in index order (a1 through h8).
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                entry.map(|(piece, color)| (Square::from_index(index as u8), piece, color))
            })
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.occupied_squares()
            .find(|&(_, piece, c)| piece == Piece::King && c == color)
            .map(|(square, _, _)| square)
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    pub fn toggle_turn(&mut self) -> Color {
        self.turn = self.turn.opposite();
        self.turn
    }

    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    pub fn lose_castle_rights(&mut self, lost_rights: CastleRights) {
        self.castle_rights &= !lost_rights;
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.en_passant_target = target;
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    /// Applies a move, toggling the side to move and updating castle rights,
    /// the en passant target, and the move clocks. Returns the [`MoveUndo`]
    /// record that exactly reverses the application.
    pub fn apply(&mut self, mv: &Move) -> Result<MoveUndo, BoardError> {
        let from = mv.from();
        let to = mv.to();
        let (piece, color) = self
            .get(from)
            .ok_or(BoardError::EmptySquare { square: from })?;

        // Validated up front: every error path below this point would leave
        // the position half-applied.
        let castle_rook = if mv.is_castle() {
            let (rook_from, rook_to) = rook_castle_squares(to)?;
            match self.get(rook_from) {
                Some((Piece::Rook, _)) => {}
                _ => return Err(BoardError::MissingCastleRook { square: rook_from }),
            }
            Some((rook_from, rook_to))
        } else {
            None
        };

        let mut undo = MoveUndo {
            captured: None,
            castle_rights: self.castle_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
        };

        let victim_square = if mv.is_en_passant() {
            Square::from_rank_file(from.rank(), to.file())
        } else {
            to
        };
        if let Some((victim, _)) = self.remove(victim_square) {
            undo.captured = Some((victim, victim_square));
        }

        self.squares[from.index()] = None;
        self.squares[to.index()] = Some((mv.promotion().unwrap_or(piece), color));

        if let Some((rook_from, rook_to)) = castle_rook {
            self.squares[rook_to.index()] = self.squares[rook_from.index()].take();
        }

        self.update_castle_rights(piece, color, from, undo.captured);

        self.en_passant_target = if piece == Piece::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            Some(Square::from_rank_file((from.rank() + to.rank()) / 2, from.file()))
        } else {
            None
        };

        if piece == Piece::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }
        self.turn = color.opposite();

        Ok(undo)
    }

    /// Exactly reverses a move previously applied with [`Position::apply`].
    pub fn undo(&mut self, mv: &Move, undo: MoveUndo) {
        let color = self.turn.opposite();
        let from = mv.from();
        let to = mv.to();

        let piece = match self.squares[to.index()] {
            // A promoted piece reverts to the pawn that moved.
            Some(_) if mv.promotion().is_some() => Piece::Pawn,
            Some((piece, _)) => piece,
            None => Piece::Pawn,
        };
        self.squares[to.index()] = None;
        self.squares[from.index()] = Some((piece, color));

        if mv.is_castle() {
            if let Ok((rook_from, rook_to)) = rook_castle_squares(to) {
                if let Some(rook) = self.remove(rook_to) {
                    self.squares[rook_from.index()] = Some(rook);
                }
            }
        }

        if let Some((victim, square)) = undo.captured {
            self.squares[square.index()] = Some((victim, color.opposite()));
        }

        self.castle_rights = undo.castle_rights;
        self.en_passant_target = undo.en_passant_target;
        self.halfmove_clock = undo.halfmove_clock;
        if color == Color::Black {
            self.fullmove_number -= 1;
        }
        self.turn = color;
    }

    /// Applies a move and returns a guard that reverts it when dropped. The
    /// guard dereferences to the mutated position, which makes apply/undo
    /// pairing hold on every exit path of a recursive search, including
    /// early pruning returns.
    pub fn apply_scoped(&mut self, mv: &Move) -> Result<AppliedMove<'_>, BoardError> {
        let undo = self.apply(mv)?;
        Ok(AppliedMove {
            position: self,
            mv: *mv,
            undo,
        })
    }

    fn update_castle_rights(
        &mut self,
        piece: Piece,
        color: Color,
        from: Square,
        captured: Option<(Piece, Square)>,
    ) {
        if piece == Piece::King {
            self.lose_castle_rights(both_rights(color));
        }
        if piece == Piece::Rook {
            if let Some(lost) = corner_rights(from) {
                self.lose_castle_rights(lost);
            }
        }
        if let Some((Piece::Rook, square)) = captured {
            if let Some(lost) = corner_rights(square) {
                self.lose_castle_rights(lost);
            }
        }
    }
}

/// Rook movement for a castling king landing on `king_to`.
fn rook_castle_squares(king_to: Square) -> Result<(Square, Square), BoardError> {
    let rank = king_to.rank();
    match king_to.file() {
        6 => Ok((
            Square::from_rank_file(rank, 7),
            Square::from_rank_file(rank, 5),
        )),
        2 => Ok((
            Square::from_rank_file(rank, 0),
            Square::from_rank_file(rank, 3),
        )),
        _ => Err(BoardError::MissingCastleRook { square: king_to }),
    }
}

fn corner_rights(square: Square) -> Option<CastleRights> {
    match (square.rank(), square.file()) {
        (0, 0) => Some(queenside_rights(Color::White)),
        (0, 7) => Some(kingside_rights(Color::White)),
        (7, 0) => Some(queenside_rights(Color::Black)),
        (7, 7) => Some(kingside_rights(Color::Black)),
        _ => None,
    }
}

/// RAII guard over a move applied to a shared `Position` during search.
/// Reverts the move on drop.
pub struct AppliedMove<'a> {
    position: &'a mut Position,
    mv: Move,
    undo: MoveUndo,
}

impl Deref for AppliedMove<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.position
    }
}

impl DerefMut for AppliedMove<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.position
    }
}

impl Drop for AppliedMove<'_> {
    fn drop(&mut self) {
        self.position.undo(&self.mv, self.undo);
    }
}

#[cfg(test)]
mod tests {
    use super::castle_rights::*;
    use super::square::*;
    use super::*;
    use crate::chess_move::Move;

    #[test]
    fn test_apply_undo_is_exact_inverse_for_quiet_move() {
        let mut position = Position::starting_position();
        let before = position.clone();

        let mv = Move::new(E2, E4);
        let undo = position.apply(&mv).unwrap();
        assert_eq!(position.get(E4), Some((Piece::Pawn, Color::White)));
        assert_eq!(position.get(E2), None);
        assert_eq!(position.turn(), Color::Black);
        assert_eq!(position.en_passant_target(), Some(E3));
        assert_eq!(position.halfmove_clock(), 0);

        position.undo(&mv, undo);
        assert_eq!(position, before);
    }

    #[test]
    fn test_apply_undo_is_exact_inverse_for_capture() {
        let mut position = Position::new();
        position.put(E4, Piece::Pawn, Color::White).unwrap();
        position.put(D5, Piece::Pawn, Color::Black).unwrap();
        position.put(E1, Piece::King, Color::White).unwrap();
        position.put(E8, Piece::King, Color::Black).unwrap();
        position.lose_castle_rights(ALL_CASTLE_RIGHTS);
        let before = position.clone();

        let mv = Move::capture(E4, D5, Piece::Pawn);
        let undo = position.apply(&mv).unwrap();
        assert_eq!(position.get(D5), Some((Piece::Pawn, Color::White)));
        assert_eq!(undo.captured(), Some((Piece::Pawn, D5)));

        position.undo(&mv, undo);
        assert_eq!(position, before);
    }

    #[test]
    fn test_apply_undo_is_exact_inverse_for_castle() {
        let mut position = Position::new();
        position.put(E1, Piece::King, Color::White).unwrap();
        position.put(H1, Piece::Rook, Color::White).unwrap();
        position.put(A1, Piece::Rook, Color::White).unwrap();
        position.put(E8, Piece::King, Color::Black).unwrap();
        position.lose_castle_rights(both_rights(Color::Black));
        let before = position.clone();

        let mv = Move::castle(E1, G1);
        let undo = position.apply(&mv).unwrap();
        assert_eq!(position.get(G1), Some((Piece::King, Color::White)));
        assert_eq!(position.get(F1), Some((Piece::Rook, Color::White)));
        assert_eq!(position.get(H1), None);
        assert_eq!(position.castle_rights(), 0);

        position.undo(&mv, undo);
        assert_eq!(position, before);
    }

    #[test]
    fn test_apply_undo_is_exact_inverse_for_en_passant() {
        let mut position = Position::new();
        position.put(E5, Piece::Pawn, Color::White).unwrap();
        position.put(D5, Piece::Pawn, Color::Black).unwrap();
        position.put(E1, Piece::King, Color::White).unwrap();
        position.put(E8, Piece::King, Color::Black).unwrap();
        position.lose_castle_rights(ALL_CASTLE_RIGHTS);
        position.set_en_passant_target(Some(D6));
        let before = position.clone();

        let mv = Move::en_passant(E5, D6);
        let undo = position.apply(&mv).unwrap();
        assert_eq!(position.get(D6), Some((Piece::Pawn, Color::White)));
        assert_eq!(position.get(D5), None, "captured pawn is removed from d5");
        assert_eq!(position.en_passant_target(), None);

        position.undo(&mv, undo);
        assert_eq!(position, before);
    }

    #[test]
    fn test_apply_undo_is_exact_inverse_for_promotion() {
        let mut position = Position::new();
        position.put(A7, Piece::Pawn, Color::White).unwrap();
        position.put(B8, Piece::Rook, Color::Black).unwrap();
        position.put(E1, Piece::King, Color::White).unwrap();
        position.put(E8, Piece::King, Color::Black).unwrap();
        position.lose_castle_rights(ALL_CASTLE_RIGHTS);
        let before = position.clone();

        let mv = Move::promote(A7, B8, Piece::Queen, Some(Piece::Rook));
        let undo = position.apply(&mv).unwrap();
        assert_eq!(position.get(B8), Some((Piece::Queen, Color::White)));

        position.undo(&mv, undo);
        assert_eq!(position, before);
    }

    #[test]
    fn test_rook_moves_and_captures_update_castle_rights() {
        let mut position = Position::new();
        position.put(E1, Piece::King, Color::White).unwrap();
        position.put(H1, Piece::Rook, Color::White).unwrap();
        position.put(E8, Piece::King, Color::Black).unwrap();
        position.put(H8, Piece::Rook, Color::Black).unwrap();

        let mv = Move::capture(H1, H8, Piece::Rook);
        let undo = position.apply(&mv).unwrap();
        assert_eq!(
            position.castle_rights(),
            WHITE_QUEENSIDE_RIGHTS | BLACK_QUEENSIDE_RIGHTS,
            "both kingside rights are lost: one rook moved, the other was captured"
        );

        position.undo(&mv, undo);
        assert_eq!(position.castle_rights(), ALL_CASTLE_RIGHTS);
    }

    #[test]
    fn test_fullmove_number_advances_after_black_moves() {
        let mut position = Position::starting_position();
        assert_eq!(position.fullmove_number(), 1);

        position.apply(&Move::new(E2, E4)).unwrap();
        assert_eq!(position.fullmove_number(), 1);

        position.apply(&Move::new(E7, E5)).unwrap();
        assert_eq!(position.fullmove_number(), 2);
    }

    #[test]
    fn test_scoped_apply_reverts_on_drop() {
        let mut position = Position::starting_position();
        let before = position.clone();

        {
            let mut applied = position.apply_scoped(&Move::new(G1, F3)).unwrap();
            assert_eq!(applied.get(F3), Some((Piece::Knight, Color::White)));
            // nested application through the guard
            let nested = applied.apply_scoped(&Move::new(B8, C6)).unwrap();
            assert_eq!(nested.get(C6), Some((Piece::Knight, Color::Black)));
        }

        assert_eq!(position, before);
    }

    #[test]
    fn test_malformed_castle_leaves_position_unchanged() {
        let mut position = Position::new();
        position.put(E1, Piece::King, Color::White).unwrap();
        position.put(E8, Piece::King, Color::Black).unwrap();
        let before = position.clone();

        // Kingside castle without a rook on h1.
        let result = position.apply(&Move::castle(E1, G1));
        assert_eq!(result, Err(BoardError::MissingCastleRook { square: H1 }));
        assert_eq!(position, before);

        // A castle move whose destination is not a castling square.
        let result = position.apply(&Move::castle(E1, F1));
        assert_eq!(result, Err(BoardError::MissingCastleRook { square: F1 }));
        assert_eq!(position, before);
    }

    #[test]
    fn test_apply_from_empty_square_is_an_error() {
        let mut position = Position::starting_position();
        let result = position.apply(&Move::new(E4, E5));
        assert_eq!(result, Err(BoardError::EmptySquare { square: E4 }));
    }
}
