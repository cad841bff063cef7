//! Game state: board plus turn, castling rights, en-passant target and the
//! make/unmake history.
//!
//! Every mutation ends with a full regeneration of cached move sets, so any
//! `Game` a caller can observe has occupancy, the square index and every
//! piece's pseudo-legal targets in agreement.

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::{Board, Piece, PieceId};
use crate::game_state::chess_rules::{
    castle_rook_target, castle_side_for_rook_home, promotion_rank, rook_home, PROMOTION_PIECES,
};
use crate::game_state::chess_types::{square_bit, CastlingRights, Color, PieceKind, Square};
use crate::game_state::position_record::PositionRecord;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_checks::{self, is_in_check};
use crate::move_generation::legal_move_generator::{self, resolve_move_spec};
use crate::move_generation::move_expansion::{
    self, castle_side_for, captured_piece_for, BlockedMoves,
};
use crate::move_generation::pseudo_legal::reprocess_all_pieces;
use crate::moves::chess_move::{Move, MoveSpec};
use crate::search::board_scoring::material_balance;

/// Outcome of the position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) history: Vec<UndoState>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Game {
    /// Standard starting position, White to move, all rights set.
    pub fn new_game() -> Self {
        Self::from_parts(Board::standard(), Color::White, CastlingRights::ALL, None)
    }

    /// Builds a game around an already-populated board and regenerates moves.
    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
    ) -> Self {
        let mut game = Self {
            board,
            side_to_move,
            castling_rights,
            en_passant_target,
            history: Vec::new(),
        };
        game.regenerate_moves();
        game
    }

    /// Loads a parsed position. Each side must have exactly one king.
    pub fn from_record(record: &PositionRecord) -> ChessResult<Self> {
        let mut board = Board::empty();
        for placed in &record.pieces {
            board.add_piece(placed.kind, placed.color, placed.square)?;
        }
        for color in [Color::White, Color::Black] {
            if board.king(color).is_none() {
                return Err(ChessError::position(format!("no {color:?} king")));
            }
        }
        if let Some(target) = record.en_passant_target {
            if target > 63 {
                return Err(ChessError::position(format!(
                    "en-passant target {target} is off the board"
                )));
            }
        }

        let game = Self::from_parts(
            board,
            record.side_to_move,
            record.castling_rights,
            record.en_passant_target,
        );
        debug!(
            pieces = game.board.piece_count(),
            side_to_move = ?game.side_to_move,
            "position loaded"
        );
        Ok(game)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|undo| undo.mv)
    }

    /// Recomputes every piece's pseudo-legal targets and empty-board reach.
    pub fn regenerate_moves(&mut self) {
        reprocess_all_pieces(
            &mut self.board,
            self.side_to_move,
            self.castling_rights,
            self.en_passant_target,
        );
    }

    /// Plays `mv` after checking it against the current position.
    ///
    /// The move must belong to the side to move and must not leave that
    /// side's king attacked; a rejected move leaves the game unchanged.
    pub fn make_move(&mut self, mv: Move) -> ChessResult<()> {
        if let Err(err) = self.validate(&mv) {
            debug!(from = mv.from, to = mv.to, %err, "move rejected");
            return Err(err);
        }

        let mover = self.side_to_move;
        self.play(mv);
        if is_in_check(&self.board, mover) {
            self.unmake_move();
            let err = ChessError::movement(format!("{mover:?} king would be left in check"));
            debug!(from = mv.from, to = mv.to, %err, "move rejected");
            return Err(err);
        }

        debug!(from = mv.from, to = mv.to, promotion = ?mv.promotion, "move applied");
        Ok(())
    }

    /// Unchecked apply used by the search and the legality filter.
    pub(crate) fn play(&mut self, mv: Move) {
        let Some(mover) = self.board.piece(mv.piece).copied() else {
            return;
        };
        let color = mover.color;
        let mut undo = UndoState {
            mv,
            captured_piece: None,
            prev_side_to_move: self.side_to_move,
            prev_castling_rights: self.castling_rights,
            prev_en_passant_target: self.en_passant_target,
            prev_move_sets: self.board.move_sets(),
        };

        if let Some(captured_id) = mv.captured {
            undo.captured_piece = self.board.take(captured_id);
            if let Some(captured) = undo.captured_piece {
                if captured.kind == PieceKind::Rook {
                    if let Some(side) = castle_side_for_rook_home(captured.color, captured.square) {
                        self.castling_rights.revoke(captured.color, side);
                    }
                }
            }
        }

        self.board.relocate(mv.piece, mv.to);
        if let Some(kind) = mv.promotion {
            self.board.set_kind(mv.piece, kind);
        }
        if let Some(side) = mv.castle {
            if let Some(rook) = self.board.piece_at(rook_home(color, side)) {
                self.board.relocate(rook, castle_rook_target(color, side));
            }
        }

        match mover.kind {
            PieceKind::King => self.castling_rights.revoke_all(color),
            PieceKind::Rook => {
                if let Some(side) = castle_side_for_rook_home(color, mv.from) {
                    self.castling_rights.revoke(color, side);
                }
            }
            _ => {}
        }

        self.en_passant_target = if mover.kind == PieceKind::Pawn && mv.from.abs_diff(mv.to) == 16 {
            Some((mv.from + mv.to) / 2)
        } else {
            None
        };
        self.side_to_move = color.opposite();
        self.history.push(undo);
        self.regenerate_moves();
    }

    /// Reverts the most recent move. Returns `None` when there is nothing to
    /// undo.
    pub fn unmake_move(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;
        let mv = undo.mv;

        if let Some(side) = mv.castle {
            let color = self.board.piece(mv.piece).map(|p| p.color)?;
            if let Some(rook) = self.board.piece_at(castle_rook_target(color, side)) {
                self.board.relocate(rook, rook_home(color, side));
            }
        }

        self.board.relocate(mv.piece, mv.from);
        if mv.promotion.is_some() {
            self.board.set_kind(mv.piece, PieceKind::Pawn);
        }
        if let (Some(id), Some(piece)) = (mv.captured, undo.captured_piece) {
            self.board.restore(id, piece);
        }

        self.side_to_move = undo.prev_side_to_move;
        self.castling_rights = undo.prev_castling_rights;
        self.en_passant_target = undo.prev_en_passant_target;
        self.board.restore_move_sets(&undo.prev_move_sets);
        Some(mv)
    }

    /// Resolves `spec` against the legal moves of the side to move and plays
    /// it.
    pub fn apply_move(&mut self, spec: &MoveSpec) -> ChessResult<Move> {
        let mv = match resolve_move_spec(self, spec) {
            Ok(mv) => mv,
            Err(err) => {
                debug!(?spec, %err, "move rejected");
                return Err(err);
            }
        };
        self.make_move(mv)?;
        Ok(mv)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(&self.board, color)
    }

    pub fn is_square_attacked(&self, color: Color, square: Square) -> bool {
        legal_move_checks::is_square_attacked(&self.board, color, square)
    }

    /// Legal moves of `color`. The game is restored before returning.
    pub fn legal_moves(&mut self, color: Color) -> Vec<Move> {
        legal_move_generator::legal_moves(self, color)
    }

    pub fn pseudo_legal_moves(&self, color: Color, blocked: BlockedMoves) -> Vec<Move> {
        move_expansion::pseudo_legal_moves(self, color, blocked)
    }

    /// Pieces whose empty-board reach covers `square`.
    pub fn pieces_reaching(&self, square: Square) -> Vec<PieceId> {
        let bit = square_bit(square);
        self.board
            .pieces()
            .filter(|(_, piece)| piece.reach & bit != 0)
            .map(|(id, _)| id)
            .collect()
    }

    /// White-positive material sum, king excluded.
    pub fn material_balance(&self) -> i32 {
        material_balance(&self.board)
    }

    pub fn status(&mut self) -> GameStatus {
        let side = self.side_to_move;
        if !self.legal_moves(side).is_empty() {
            GameStatus::Ongoing
        } else if self.is_in_check(side) {
            GameStatus::Checkmate {
                winner: side.opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    fn validate(&self, mv: &Move) -> ChessResult<()> {
        if mv.blocked {
            return Err(ChessError::movement("blocked moves cannot be played"));
        }
        let piece: &Piece = self
            .board
            .piece(mv.piece)
            .ok_or_else(|| ChessError::movement("moving piece is no longer on the board"))?;
        if piece.color != self.side_to_move {
            return Err(ChessError::movement(format!(
                "{:?} cannot move while {:?} is to move",
                piece.color, self.side_to_move
            )));
        }
        if piece.square != mv.from {
            return Err(ChessError::movement(format!(
                "moving piece is on {} not {}",
                piece.square, mv.from
            )));
        }
        if piece.moves & square_bit(mv.to) == 0 {
            return Err(ChessError::movement(format!(
                "{:?} on {} cannot reach {}",
                piece.kind, mv.from, mv.to
            )));
        }
        if mv.captured != captured_piece_for(self, piece, mv.to) {
            return Err(ChessError::movement("captured piece does not match the position"));
        }
        if mv.castle != castle_side_for(piece, mv.to) {
            return Err(ChessError::movement("castling flag does not match the move"));
        }

        let promotes = piece.kind == PieceKind::Pawn && mv.to / 8 == promotion_rank(piece.color);
        match (promotes, mv.promotion) {
            (true, None) => Err(ChessError::movement("pawn reaching the last rank needs a promotion piece")),
            (true, Some(kind)) if !PROMOTION_PIECES.contains(&kind) => {
                Err(ChessError::movement(format!("cannot promote to {kind:?}")))
            }
            (false, Some(_)) => Err(ChessError::movement("only a pawn reaching the last rank promotes")),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::position_record::PlacedPiece;

    fn find(game: &mut Game, from: Square, to: Square) -> Move {
        let side = game.side_to_move();
        game.legal_moves(side)
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to)
            .expect("move should be legal")
    }

    #[test]
    fn new_game_has_twenty_moves_and_even_material() {
        let mut game = Game::new_game();
        assert_eq!(game.legal_moves(Color::White).len(), 20);
        assert_eq!(game.legal_moves(Color::Black).len(), 20);
        assert_eq!(game.material_balance(), 0);
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn double_push_sets_and_next_move_clears_en_passant_target() {
        let mut game = Game::new_game();
        let e2e4 = find(&mut game, 12, 28);
        game.make_move(e2e4).expect("e2e4 should apply");
        assert_eq!(game.en_passant_target(), Some(20));
        assert_eq!(game.side_to_move(), Color::Black);

        let g8f6 = find(&mut game, 62, 45);
        game.make_move(g8f6).expect("Nf6 should apply");
        assert_eq!(game.en_passant_target(), None);
    }

    #[test]
    fn unmake_restores_exact_state() {
        let mut game = Game::new_game();
        let before = game.clone();
        let mv = find(&mut game, 6, 21);
        game.make_move(mv).expect("Nf3 should apply");
        assert_eq!(game.unmake_move(), Some(mv));
        assert_eq!(game, before);
        assert_eq!(game.unmake_move(), None);
    }

    #[test]
    fn rejects_stale_and_unreachable_moves() {
        let mut game = Game::new_game();
        let mut mv = find(&mut game, 12, 28);
        mv.from = 13;
        assert!(matches!(game.make_move(mv), Err(ChessError::InvalidMovement(_))));

        let mut jump = find(&mut game, 12, 28);
        jump.to = 36;
        assert!(matches!(game.make_move(jump), Err(ChessError::InvalidMovement(_))));
    }

    #[test]
    fn rejects_moves_of_the_side_not_to_move() {
        let mut game = Game::new_game();
        let black_reply = game
            .legal_moves(Color::Black)
            .into_iter()
            .find(|mv| mv.from == 52 && mv.to == 36)
            .expect("e7e5 is a legal Black move");
        let before = game.clone();
        assert!(matches!(
            game.make_move(black_reply),
            Err(ChessError::InvalidMovement(_))
        ));
        assert_eq!(game, before);
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn promotion_requires_piece_choice() {
        let record = PositionRecord {
            pieces: vec![
                PlacedPiece::new(PieceKind::King, Color::White, 4),
                PlacedPiece::new(PieceKind::King, Color::Black, 39),
                PlacedPiece::new(PieceKind::Pawn, Color::White, 52),
            ],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_target: None,
        };
        let mut game = Game::from_record(&record).expect("position should load");
        let mut promote = find(&mut game, 52, 60);
        assert_eq!(promote.promotion, Some(PieceKind::Queen));

        promote.promotion = None;
        assert!(matches!(game.make_move(promote), Err(ChessError::InvalidMovement(_))));

        promote.promotion = Some(PieceKind::Knight);
        game.make_move(promote).expect("underpromotion should apply");
        assert_eq!(game.board().piece_on(60).map(|p| p.kind), Some(PieceKind::Knight));
        assert_eq!(game.material_balance(), 3);

        game.unmake_move();
        assert_eq!(game.board().piece_on(52).map(|p| p.kind), Some(PieceKind::Pawn));
    }

    #[test]
    fn loading_requires_one_king_per_side() {
        let record = PositionRecord {
            pieces: vec![PlacedPiece::new(PieceKind::King, Color::White, 4)],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_target: None,
        };
        assert!(matches!(
            Game::from_record(&record),
            Err(ChessError::InvalidPosition(_))
        ));
    }

    #[test]
    fn pieces_reaching_counts_blocked_rays() {
        let game = Game::new_game();
        // e3: d2 and f2 pawn captures, the e2 push and the c1 bishop's diagonal.
        let reaching = game.pieces_reaching(20);
        let squares: Vec<Square> = reaching
            .iter()
            .filter_map(|id| game.board().piece(*id).map(|p| p.square))
            .collect();
        for square in [11, 12, 13, 2] {
            assert!(squares.contains(&square), "missing piece on {square}");
        }
    }
}
