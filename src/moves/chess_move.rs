//! Move records and the move requests the boundary layers hand in.

use crate::game_state::board::PieceId;
use crate::game_state::chess_types::{CastleSide, PieceKind, Square};

/// One concrete move, produced fresh on every regeneration.
///
/// Pieces are referenced by arena identity, never by `(kind, color, square)`,
/// so two same-kind pieces can never be confused during simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceId>,
    pub promotion: Option<PieceKind>,
    pub castle: Option<CastleSide>,
    /// Reachable only on an empty board. Bookkeeping only, never playable.
    pub blocked: bool,
}

impl Move {
    #[inline]
    pub const fn quiet(piece: PieceId, from: Square, to: Square) -> Self {
        Self {
            piece,
            from,
            to,
            captured: None,
            promotion: None,
            castle: None,
            blocked: false,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Captures a pawn that is not standing on the destination square.
    #[inline]
    pub const fn is_en_passant(&self, en_passant_target: Option<Square>) -> bool {
        match (self.captured, en_passant_target) {
            (Some(_), Some(target)) => target == self.to && self.from % 8 != self.to % 8,
            _ => false,
        }
    }
}

/// What a caller asks `apply_move` to play.
///
/// `Piece` is the disambiguation tuple a notation parser produces; it is
/// resolved against the legal moves of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSpec {
    Resolved(Move),
    Piece {
        kind: PieceKind,
        from_file: Option<u8>,
        from_rank: Option<u8>,
        to: Square,
        promotion: Option<PieceKind>,
    },
    Castle(CastleSide),
}

impl MoveSpec {
    /// Shorthand for a fully specified origin and destination.
    pub fn from_to(kind: PieceKind, from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        MoveSpec::Piece {
            kind,
            from_file: Some(from % 8),
            from_rank: Some(from / 8),
            to,
            promotion,
        }
    }
}
