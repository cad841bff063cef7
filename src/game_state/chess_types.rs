//! Primitive chess vocabulary shared by every subsystem.
//!
//! Squares are plain indices (`0 == a1`, `7 == h1`, `63 == h8`) and square
//! sets are raw `u64` bitboards with bit `i` standing for square `i`.

use serde::{Deserialize, Serialize};

/// Board square index (`0..=63`, `rank * 8 + file`).
pub type Square = u8;

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// `+1` for White, `-1` for Black. Used to sign evaluations.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

/// Piece kind. Color is carried separately by the owning piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            CastleSide::Kingside => 0,
            CastleSide::Queenside => 1,
        }
    }
}

/// Per-color castling permissions. Once cleared during play a right is never
/// set again; only `unmake_move` restores an earlier snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub kingside: [bool; 2],
    pub queenside: [bool; 2],
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        kingside: [true, true],
        queenside: [true, true],
    };

    pub const NONE: CastlingRights = CastlingRights {
        kingside: [false, false],
        queenside: [false, false],
    };

    #[inline]
    pub const fn allows(&self, color: Color, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside[color.index()],
            CastleSide::Queenside => self.queenside[color.index()],
        }
    }

    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        match side {
            CastleSide::Kingside => self.kingside[color.index()] = false,
            CastleSide::Queenside => self.queenside[color.index()] = false,
        }
    }

    #[inline]
    pub fn revoke_all(&mut self, color: Color) {
        self.kingside[color.index()] = false;
        self.queenside[color.index()] = false;
    }
}

#[inline]
pub const fn square_bit(square: Square) -> u64 {
    1u64 << square
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}
