//! Parsed position as handed in by the boundary converters.
//!
//! The record is plain data: it is what a FEN parser (or a session store)
//! produces and what `Game::from_record` consumes. Validation happens on load.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{CastlingRights, Color, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

impl PlacedPiece {
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self { kind, color, square }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub pieces: Vec<PlacedPiece>,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
}
