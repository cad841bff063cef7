//! Canonical chess-rule constants.
//!
//! Static literals the rules code keys off: the standard starting position,
//! king and rook home squares, castling paths and promotion choices.

use crate::game_state::chess_types::{CastleSide, Color, PieceKind, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank layout of the standard start, file a through h.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Promotion fan-out order. Fixed so perft and search are reproducible.
pub const PROMOTION_PIECES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Most pieces a legal position can hold; also the board arena capacity.
pub const MAX_PIECES: usize = 32;

#[inline]
pub const fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

#[inline]
pub const fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

#[inline]
pub const fn king_home(color: Color) -> Square {
    home_rank(color) * 8 + 4
}

#[inline]
pub const fn rook_home(color: Color, side: CastleSide) -> Square {
    match side {
        CastleSide::Kingside => home_rank(color) * 8 + 7,
        CastleSide::Queenside => home_rank(color) * 8,
    }
}

/// Where the king lands when castling.
#[inline]
pub const fn castle_king_target(color: Color, side: CastleSide) -> Square {
    match side {
        CastleSide::Kingside => home_rank(color) * 8 + 6,
        CastleSide::Queenside => home_rank(color) * 8 + 2,
    }
}

/// Where the rook lands when castling.
#[inline]
pub const fn castle_rook_target(color: Color, side: CastleSide) -> Square {
    match side {
        CastleSide::Kingside => home_rank(color) * 8 + 5,
        CastleSide::Queenside => home_rank(color) * 8 + 3,
    }
}

/// Squares strictly between king and rook; all must be empty.
#[inline]
pub const fn castle_empty_mask(color: Color, side: CastleSide) -> u64 {
    let shift = home_rank(color) as u32 * 8;
    match side {
        CastleSide::Kingside => 0b0110_0000u64 << shift,
        CastleSide::Queenside => 0b0000_1110u64 << shift,
    }
}

/// King origin, transit and destination; none may be attacked.
#[inline]
pub const fn castle_safe_mask(color: Color, side: CastleSide) -> u64 {
    let shift = home_rank(color) as u32 * 8;
    match side {
        CastleSide::Kingside => 0b0111_0000u64 << shift,
        CastleSide::Queenside => 0b0001_1100u64 << shift,
    }
}

/// The castling right that a rook standing on `square` guards, if any.
#[inline]
pub fn castle_side_for_rook_home(color: Color, square: Square) -> Option<CastleSide> {
    if square == rook_home(color, CastleSide::Kingside) {
        Some(CastleSide::Kingside)
    } else if square == rook_home(color, CastleSide::Queenside) {
        Some(CastleSide::Queenside)
    } else {
        None
    }
}
