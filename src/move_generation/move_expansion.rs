//! Turns cached target masks into `Move` records.
//!
//! One record per target square, except pawns reaching the last rank, which
//! fan out into one record per promotion piece. Castling and en-passant
//! records are recognised here from the geometry of the target.

use crate::game_state::board::{Piece, PieceId};
use crate::game_state::chess_rules::{castle_king_target, king_home, promotion_rank, PROMOTION_PIECES};
use crate::game_state::chess_types::{CastleSide, Color, PieceKind, Square};
use crate::game_state::game::Game;
use crate::moves::chess_move::Move;

/// Whether empty-board-only targets are emitted as `blocked` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockedMoves {
    #[default]
    Exclude,
    Include,
}

pub fn pseudo_legal_moves(game: &Game, color: Color, blocked: BlockedMoves) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_legal_moves_into(game, color, blocked, &mut out);
    out
}

pub fn pseudo_legal_moves_into(game: &Game, color: Color, blocked: BlockedMoves, out: &mut Vec<Move>) {
    for (id, _) in game.board.pieces_of(color) {
        expand_piece_moves(game, id, blocked, out);
    }
}

pub fn expand_piece_moves(game: &Game, id: PieceId, blocked: BlockedMoves, out: &mut Vec<Move>) {
    let Some(piece) = game.board.piece(id) else {
        return;
    };

    let mut targets = piece.moves;
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        targets &= targets - 1;

        let mv = Move {
            captured: captured_piece_for(game, piece, to),
            castle: castle_side_for(piece, to),
            ..Move::quiet(id, piece.square, to)
        };

        if piece.kind == PieceKind::Pawn && to / 8 == promotion_rank(piece.color) {
            for kind in PROMOTION_PIECES {
                out.push(Move {
                    promotion: Some(kind),
                    ..mv
                });
            }
        } else {
            out.push(mv);
        }
    }

    if blocked == BlockedMoves::Include {
        let mut unreachable = piece.reach & !piece.moves;
        while unreachable != 0 {
            let to = unreachable.trailing_zeros() as Square;
            unreachable &= unreachable - 1;
            out.push(Move {
                blocked: true,
                ..Move::quiet(id, piece.square, to)
            });
        }
    }
}

/// The piece `piece` would capture by moving to `to`.
///
/// A pawn moving diagonally onto the empty en-passant target captures the
/// pawn beside it, on the origin rank and the destination file.
pub fn captured_piece_for(game: &Game, piece: &Piece, to: Square) -> Option<PieceId> {
    if let Some(id) = game.board.piece_at(to) {
        return Some(id);
    }
    if piece.kind == PieceKind::Pawn
        && piece.color == game.side_to_move
        && game.en_passant_target == Some(to)
        && piece.square % 8 != to % 8
    {
        let victim_square = (piece.square / 8) * 8 + to % 8;
        return game
            .board
            .piece_at(victim_square)
            .filter(|id| game.board.piece(*id).is_some_and(|p| p.color != piece.color));
    }
    None
}

/// Castling side when `to` is a king's two-square castling hop.
pub fn castle_side_for(piece: &Piece, to: Square) -> Option<CastleSide> {
    if piece.kind != PieceKind::King || piece.square != king_home(piece.color) {
        return None;
    }
    [CastleSide::Kingside, CastleSide::Queenside]
        .into_iter()
        .find(|&side| castle_king_target(piece.color, side) == to)
}
