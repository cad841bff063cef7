use crate::game_state::board::{MoveSets, Piece};
use crate::game_state::chess_rules::MAX_PIECES;
use crate::game_state::chess_types::{CastlingRights, Color, Square};
use crate::moves::chess_move::Move;

/// Single undo record for `make_move` / `unmake_move`.
///
/// Besides the flags the move may clear, it keeps every slot's cached move
/// sets so that undo restores them without regenerating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub captured_piece: Option<Piece>,

    pub prev_side_to_move: Color,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_target: Option<Square>,

    pub prev_move_sets: [MoveSets; MAX_PIECES],
}
