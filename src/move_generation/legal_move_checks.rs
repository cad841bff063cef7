use crate::game_state::board::Board;
use crate::game_state::chess_types::{square_bit, Color, PieceKind, Square};
use crate::moves::pawn_moves::pawn_captures;
use crate::moves::step_moves::king_steps;

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.king_square(color)
}

/// Every square `attacker_color` currently attacks.
///
/// Pawns contribute their diagonals (pushes never attack) and kings their
/// step set (castling never attacks); everything else contributes its cached
/// pseudo-legal targets.
pub fn attacked_squares(board: &Board, attacker_color: Color) -> u64 {
    board
        .pieces_of(attacker_color)
        .fold(0u64, |acc, (_, piece)| {
            acc | match piece.kind {
                PieceKind::Pawn => pawn_captures(piece.color, piece.square),
                PieceKind::King => king_steps(piece.square),
                _ => piece.moves,
            }
        })
}

/// True iff some piece of the color opposing `color` attacks `square`.
pub fn is_square_attacked(board: &Board, color: Color, square: Square) -> bool {
    let target = square_bit(square);
    board.pieces_of(color.opposite()).any(|(_, piece)| {
        let attacks = match piece.kind {
            PieceKind::Pawn => pawn_captures(piece.color, piece.square),
            PieceKind::King => king_steps(piece.square),
            _ => piece.moves,
        };
        attacks & target != 0
    })
}

#[inline]
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, color, king_sq)
}

/// Union of the empty-board reach of every `color` piece.
#[inline]
pub fn combined_reach(board: &Board, color: Color) -> u64 {
    board.pieces_of(color).fold(0u64, |acc, (_, piece)| acc | piece.reach)
}
