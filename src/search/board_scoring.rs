//! Board evaluation for the search.
//!
//! Scores are always from White's point of view: positive favours White.
//! The search delegates static scoring to `BoardScorer` so alternate
//! heuristics can be swapped in without touching the tree walk.

use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceKind;

/// Base of the checkmate score; kings carry no material value otherwise.
pub const KING_VALUE: i32 = 9999;

/// Added to a mate score for every ply left unsearched, so faster mates win.
pub const MATE_DEPTH_BONUS: i32 = 10;

pub trait BoardScorer: Send + Sync {
    /// Score from White's perspective.
    fn score(&self, board: &Board) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board) -> i32 {
        material_balance(board)
    }
}

/// Signed material sum: White pieces add, Black pieces subtract.
pub fn material_balance(board: &Board) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| MaterialScorer::piece_value(piece.kind) * piece.color.sign())
        .sum()
}

/// Score of a checkmated node `remaining_plies` above the search horizon.
#[inline]
pub const fn mate_score(remaining_plies: u8) -> i32 {
    KING_VALUE + remaining_plies as i32 * MATE_DEPTH_BONUS
}
