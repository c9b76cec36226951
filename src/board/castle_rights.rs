//! Castle rights are tracked as a 4-bit mask, one bit per side and wing.

use crate::board::color::Color;

pub type CastleRights = u8;

pub const WHITE_KINGSIDE_RIGHTS: CastleRights = 0b0001;
pub const WHITE_QUEENSIDE_RIGHTS: CastleRights = 0b0010;
pub const BLACK_KINGSIDE_RIGHTS: CastleRights = 0b0100;
pub const BLACK_QUEENSIDE_RIGHTS: CastleRights = 0b1000;
pub const ALL_CASTLE_RIGHTS: CastleRights = 0b1111;
pub const NO_CASTLE_RIGHTS: CastleRights = 0;

pub fn kingside_rights(color: Color) -> CastleRights {
    match color {
        Color::White => WHITE_KINGSIDE_RIGHTS,
        Color::Black => BLACK_KINGSIDE_RIGHTS,
    }
}

pub fn queenside_rights(color: Color) -> CastleRights {
    match color {
        Color::White => WHITE_QUEENSIDE_RIGHTS,
        Color::Black => BLACK_QUEENSIDE_RIGHTS,
    }
}

pub fn both_rights(color: Color) -> CastleRights {
    kingside_rights(color) | queenside_rights(color)
}
