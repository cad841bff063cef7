//! Piece arena and derived occupancy.
//!
//! `Board` owns every piece in a fixed-capacity arena. A piece keeps its slot
//! (its `PieceId`) for its whole life: captures empty the slot and undo puts
//! the very same piece back, so moves and the square index can refer to
//! pieces by identity. Per-color occupancy and the square → piece index are
//! derived from the arena and updated on every relocation.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{home_rank, pawn_home_rank, BACK_RANK, MAX_PIECES};
use crate::game_state::chess_types::{square_bit, Color, PieceKind, Square};

/// Arena index of a piece. Stable for the life of a `Board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u8);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    /// Pseudo-legal destinations in the current position.
    pub moves: u64,
    /// Destinations on an otherwise empty board (castling excluded).
    pub reach: u64,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
            moves: 0,
            reach: 0,
        }
    }
}

/// Cached move sets of one arena slot, as saved in undo records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveSets {
    pub moves: u64,
    pub reach: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    slots: [Option<Piece>; MAX_PIECES],
    slot_count: usize,
    occupancy_by_color: [u64; 2],
    piece_index: [Option<PieceId>; 64],
    kings: [Option<PieceId>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            slots: [None; MAX_PIECES],
            slot_count: 0,
            occupancy_by_color: [0; 2],
            piece_index: [None; 64],
            kings: [None; 2],
        }
    }
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard starting placement. Move sets are left empty; `Game`
    /// regenerates them.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            let back = home_rank(color) * 8;
            let pawns = pawn_home_rank(color) * 8;
            for file in 0..8u8 {
                board.insert(Piece::new(BACK_RANK[file as usize], color, back + file));
            }
            for file in 0..8u8 {
                board.insert(Piece::new(PieceKind::Pawn, color, pawns + file));
            }
        }
        board
    }

    /// Adds a piece to the next free arena slot.
    pub fn add_piece(&mut self, kind: PieceKind, color: Color, square: Square) -> ChessResult<PieceId> {
        if square > 63 {
            return Err(ChessError::position(format!("square index {square} is off the board")));
        }
        if self.piece_index[square as usize].is_some() {
            return Err(ChessError::position(format!("square {square} is already occupied")));
        }
        if self.slot_count == MAX_PIECES {
            return Err(ChessError::position(format!("more than {MAX_PIECES} pieces")));
        }
        if kind == PieceKind::King && self.kings[color.index()].is_some() {
            return Err(ChessError::position(format!("more than one {color:?} king")));
        }
        Ok(self.insert(Piece::new(kind, color, square)))
    }

    fn insert(&mut self, piece: Piece) -> PieceId {
        let id = PieceId(self.slot_count as u8);
        self.slots[self.slot_count] = Some(piece);
        self.slot_count += 1;
        self.link(id, &piece);
        id
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.piece_index[square as usize]
    }

    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<&Piece> {
        self.piece_at(square).and_then(|id| self.piece(id))
    }

    /// Live pieces in arena order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.slots[..self.slot_count]
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (PieceId(i as u8), p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Every slot ever allocated, captured ones included.
    #[inline]
    pub(crate) fn slot_ids(&self) -> impl Iterator<Item = PieceId> {
        (0..self.slot_count).map(|i| PieceId(i as u8))
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> u64 {
        self.occupancy_by_color[0] | self.occupancy_by_color[1]
    }

    #[inline]
    pub fn king(&self, color: Color) -> Option<PieceId> {
        self.kings[color.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king(color).and_then(|id| self.piece(id)).map(|p| p.square)
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// Moves a live piece to an empty square.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) {
        let Some(piece) = self.slots[id.index()] else {
            return;
        };
        self.unlink(&piece);
        let moved = Piece { square: to, ..piece };
        self.slots[id.index()] = Some(moved);
        self.link(id, &moved);
    }

    /// Lifts a piece off the board, leaving its slot empty.
    pub(crate) fn take(&mut self, id: PieceId) -> Option<Piece> {
        let piece = self.slots.get_mut(id.index())?.take()?;
        self.unlink(&piece);
        if piece.kind == PieceKind::King {
            self.kings[piece.color.index()] = None;
        }
        Some(piece)
    }

    /// Puts a previously taken piece back into its own slot.
    pub(crate) fn restore(&mut self, id: PieceId, piece: Piece) {
        self.slots[id.index()] = Some(piece);
        self.link(id, &piece);
    }

    pub(crate) fn set_kind(&mut self, id: PieceId, kind: PieceKind) {
        if let Some(piece) = self.piece_mut(id) {
            piece.kind = kind;
        }
    }

    pub(crate) fn move_sets(&self) -> [MoveSets; MAX_PIECES] {
        let mut sets = [MoveSets::default(); MAX_PIECES];
        for (id, piece) in self.pieces() {
            sets[id.index()] = MoveSets {
                moves: piece.moves,
                reach: piece.reach,
            };
        }
        sets
    }

    pub(crate) fn restore_move_sets(&mut self, sets: &[MoveSets; MAX_PIECES]) {
        for (i, slot) in self.slots[..self.slot_count].iter_mut().enumerate() {
            if let Some(piece) = slot {
                piece.moves = sets[i].moves;
                piece.reach = sets[i].reach;
            }
        }
    }

    /// True when occupancy, the square index and the king cache all agree
    /// with the arena.
    pub fn is_consistent(&self) -> bool {
        let mut occupancy = [0u64; 2];
        let mut index = [None; 64];
        let mut kings = [None; 2];

        for (id, piece) in self.pieces() {
            let bit = square_bit(piece.square);
            if occupancy[0] & bit != 0 || occupancy[1] & bit != 0 {
                return false;
            }
            occupancy[piece.color.index()] |= bit;
            index[piece.square as usize] = Some(id);
            if piece.kind == PieceKind::King {
                kings[piece.color.index()] = Some(id);
            }
        }

        occupancy == self.occupancy_by_color && index == self.piece_index && kings == self.kings
    }

    fn link(&mut self, id: PieceId, piece: &Piece) {
        self.occupancy_by_color[piece.color.index()] |= square_bit(piece.square);
        self.piece_index[piece.square as usize] = Some(id);
        if piece.kind == PieceKind::King {
            self.kings[piece.color.index()] = Some(id);
        }
    }

    fn unlink(&mut self, piece: &Piece) {
        self.occupancy_by_color[piece.color.index()] &= !square_bit(piece.square);
        self.piece_index[piece.square as usize] = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_board_occupancy() {
        let board = Board::standard();
        assert_eq!(board.occupancy(Color::White), 0xFFFF);
        assert_eq!(board.occupancy(Color::Black), 0xFFFF << 48);
        assert_eq!(board.piece_count(), 32);
        assert_eq!(board.king_square(Color::White), Some(4));
        assert_eq!(board.king_square(Color::Black), Some(60));
        assert!(board.is_consistent());
    }

    #[test]
    fn take_and_restore_keep_identity() {
        let mut board = Board::empty();
        let rook = board.add_piece(PieceKind::Rook, Color::White, 0).expect("a1 is free");
        let knight = board.add_piece(PieceKind::Knight, Color::Black, 9).expect("b2 is free");

        let taken = board.take(knight).expect("knight is live");
        assert_eq!(board.piece_at(9), None);
        assert_eq!(board.occupancy(Color::Black), 0);

        board.relocate(rook, 9);
        assert_eq!(board.piece_at(9), Some(rook));
        board.relocate(rook, 0);
        board.restore(knight, taken);

        assert_eq!(board.piece_at(9), Some(knight));
        assert_eq!(board.piece(knight).map(|p| p.kind), Some(PieceKind::Knight));
        assert!(board.is_consistent());
    }

    #[test]
    fn rejects_overlaps_and_second_kings() {
        let mut board = Board::empty();
        board.add_piece(PieceKind::King, Color::White, 4).expect("e1 is free");
        assert!(matches!(
            board.add_piece(PieceKind::Queen, Color::Black, 4),
            Err(ChessError::InvalidPosition(_))
        ));
        assert!(matches!(
            board.add_piece(PieceKind::King, Color::White, 12),
            Err(ChessError::InvalidPosition(_))
        ));
    }
}
