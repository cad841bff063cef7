//! Per-piece pseudo-legal target masks.
//!
//! Each live piece caches two masks: `moves`, the squares it may move to in
//! the current position ignoring self-check, and `reach`, the squares it
//! would cover on an empty board. Reprocessing runs over non-king pieces
//! first and kings last, because castling safety reads the opponent's
//! freshly computed attacks.

use crate::game_state::board::{Board, Piece, PieceId};
use crate::game_state::chess_rules::{
    castle_empty_mask, castle_king_target, castle_safe_mask, king_home, rook_home,
};
use crate::game_state::chess_types::{square_bit, CastleSide, CastlingRights, Color, PieceKind, Square};
use crate::move_generation::legal_move_checks::attacked_squares;
use crate::moves::pawn_moves::{pawn_captures, pawn_double_push, pawn_push};
use crate::moves::ray_moves::{slider_attacks, slider_reach};
use crate::moves::step_moves::{king_steps, knight_steps};

/// Recomputes `moves` and `reach` for every piece on the board.
pub fn reprocess_all_pieces(
    board: &mut Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
) {
    let ids: Vec<PieceId> = board.slot_ids().collect();

    for &id in &ids {
        let Some(piece) = board.piece(id).copied() else {
            continue;
        };
        if piece.kind == PieceKind::King {
            continue;
        }
        let (moves, reach) = piece_sets(board, &piece, side_to_move, en_passant_target);
        store(board, id, moves, reach);
    }

    for color in [Color::White, Color::Black] {
        let Some(id) = board.king(color) else {
            continue;
        };
        let Some(king) = board.piece(id).copied() else {
            continue;
        };
        let reach = king_steps(king.square);
        let moves = (reach & !board.occupancy(color)) | castling_targets(board, &king, castling_rights);
        store(board, id, moves, reach);
    }
}

fn store(board: &mut Board, id: PieceId, moves: u64, reach: u64) {
    if let Some(piece) = board.piece_mut(id) {
        piece.moves = moves;
        piece.reach = reach;
    }
}

/// `(moves, reach)` for a non-king piece.
fn piece_sets(
    board: &Board,
    piece: &Piece,
    side_to_move: Color,
    en_passant_target: Option<Square>,
) -> (u64, u64) {
    let own = board.occupancy(piece.color);
    let square = piece.square;

    match piece.kind {
        PieceKind::Pawn => {
            let empty = !board.occupancy_all();
            let single = pawn_push(piece.color, square) & empty;
            let double = if single != 0 {
                pawn_double_push(piece.color, square) & empty
            } else {
                0
            };
            // The en-passant target only exists for the side that may use it.
            let en_passant = match en_passant_target {
                Some(target) if piece.color == side_to_move => square_bit(target),
                _ => 0,
            };
            let captures =
                pawn_captures(piece.color, square) & (board.occupancy(piece.color.opposite()) | en_passant);
            let reach = pawn_push(piece.color, square)
                | pawn_double_push(piece.color, square)
                | pawn_captures(piece.color, square);
            (single | double | captures, reach)
        }
        PieceKind::Knight => {
            let reach = knight_steps(square);
            (reach & !own, reach)
        }
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => (
            slider_attacks(piece.kind, square, board.occupancy_all()) & !own,
            slider_reach(piece.kind, square),
        ),
        PieceKind::King => {
            let reach = king_steps(square);
            (reach & !own, reach)
        }
    }
}

fn castling_targets(board: &Board, king: &Piece, rights: CastlingRights) -> u64 {
    let color = king.color;
    if king.square != king_home(color) {
        return 0;
    }

    let mut targets = 0u64;
    let mut enemy_attacks = None;
    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !rights.allows(color, side) {
            continue;
        }
        let rook_in_place = board
            .piece_on(rook_home(color, side))
            .is_some_and(|p| p.kind == PieceKind::Rook && p.color == color);
        if !rook_in_place || board.occupancy_all() & castle_empty_mask(color, side) != 0 {
            continue;
        }
        let attacked = *enemy_attacks.get_or_insert_with(|| attacked_squares(board, color.opposite()));
        if attacked & castle_safe_mask(color, side) == 0 {
            targets |= square_bit(castle_king_target(color, side));
        }
    }
    targets
}
