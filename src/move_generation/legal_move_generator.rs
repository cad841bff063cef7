//! Full legal move generation pipeline.
//!
//! Expands cached pseudo-legal targets into moves, then drops the ones that
//! leave the mover's own king attacked. Simulation is make/unmake on the
//! caller's game, which is back in its original state when this returns.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{square_bit, Color};
use crate::game_state::game::Game;
use crate::move_generation::legal_move_checks::{combined_reach, is_in_check};
use crate::move_generation::move_expansion::{pseudo_legal_moves_into, BlockedMoves};
use crate::moves::chess_move::{Move, MoveSpec};

/// Legal moves of `color`, in generation order.
pub fn legal_moves(game: &mut Game, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(game, color, &mut moves);
    moves
}

pub fn legal_moves_into(game: &mut Game, color: Color, out: &mut Vec<Move>) {
    out.clear();
    pseudo_legal_moves_into(game, color, BlockedMoves::Exclude, out);

    let Some(king) = game.board.king(color) else {
        return;
    };
    let Some(king_square) = game.board.king_square(color) else {
        return;
    };
    // No enemy piece could reach the king even on an empty board: only king
    // moves can walk into an attack.
    let king_exposed = combined_reach(&game.board, color.opposite()) & square_bit(king_square) != 0;

    out.retain(|mv| {
        if mv.piece != king && !king_exposed {
            return true;
        }
        leaves_king_safe(game, *mv, color)
    });
}

fn leaves_king_safe(game: &mut Game, mv: Move, color: Color) -> bool {
    game.play(mv);
    let safe = !is_in_check(&game.board, color);
    game.unmake_move();
    safe
}

/// Resolves a move request against the legal moves of the side to move.
pub fn resolve_move_spec(game: &mut Game, spec: &MoveSpec) -> ChessResult<Move> {
    let side = game.side_to_move;
    let legal = legal_moves(game, side);

    match *spec {
        MoveSpec::Resolved(mv) => {
            if legal.contains(&mv) {
                Ok(mv)
            } else {
                Err(ChessError::movement(format!(
                    "{} to {} is not a legal move for {side:?}",
                    mv.from, mv.to
                )))
            }
        }
        MoveSpec::Castle(castle) => legal
            .into_iter()
            .find(|mv| mv.castle == Some(castle))
            .ok_or_else(|| ChessError::movement(format!("{castle:?} castling is not allowed"))),
        MoveSpec::Piece {
            kind,
            from_file,
            from_rank,
            to,
            promotion,
        } => {
            let candidates: Vec<Move> = legal
                .into_iter()
                .filter(|mv| {
                    mv.to == to
                        && game.board.piece(mv.piece).is_some_and(|p| p.kind == kind)
                        && from_file.map_or(true, |file| mv.from % 8 == file)
                        && from_rank.map_or(true, |rank| mv.from / 8 == rank)
                })
                .collect();

            let promotes = candidates.iter().any(|mv| mv.promotion.is_some());
            if promotes && promotion.is_none() {
                return Err(ChessError::movement(
                    "pawn reaching the last rank needs a promotion piece",
                ));
            }

            let mut matching = candidates.into_iter().filter(|mv| mv.promotion == promotion);
            match (matching.next(), matching.next()) {
                (Some(mv), None) => Ok(mv),
                (None, _) => Err(ChessError::movement(format!(
                    "no legal {kind:?} move to square {to}"
                ))),
                (Some(_), Some(_)) => Err(ChessError::movement(format!(
                    "{kind:?} move to square {to} is ambiguous"
                ))),
            }
        }
    }
}

/// Legal moves of the king of `color`.
pub fn king_moves(game: &mut Game, color: Color) -> Vec<Move> {
    let Some(king) = game.board.king(color) else {
        return Vec::new();
    };
    let mut moves = legal_moves(game, color);
    moves.retain(|mv| mv.piece == king);
    moves
}
