use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{PieceKind, Square};
use crate::game_state::game::Game;
use crate::moves::chess_move::{Move, MoveSpec};
use crate::utils::algebraic::{algebraic_to_square, char_to_piece, piece_to_char};

/// Origin, destination and an optional promotion letter: `e2e4`, `e7e8q`.
/// Castling is written as the king's move, `e1g1`.
pub fn move_to_long_algebraic(mv: &Move) -> String {
    let mut out = String::with_capacity(5);
    push_square(&mut out, mv.from);
    push_square(&mut out, mv.to);
    if let Some(kind) = mv.promotion {
        out.push(piece_to_char(kind));
    }
    out
}

fn push_square(out: &mut String, square: Square) {
    out.push(char::from(b'a' + square % 8));
    out.push(char::from(b'1' + square / 8));
}

/// Builds a fully disambiguated move request from long algebraic text.
///
/// The moving piece's kind is read from the origin square of `game`.
pub fn long_algebraic_to_move_spec(text: &str, game: &Game) -> ChessResult<MoveSpec> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessError::InvalidAlgebraic(format!("invalid long algebraic move: {text}")));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(ch) => match char_to_piece(ch)? {
            PieceKind::Pawn | PieceKind::King => {
                return Err(ChessError::InvalidAlgebraic(format!("cannot promote to '{ch}'")))
            }
            kind => Some(kind),
        },
        None => None,
    };

    let piece = game
        .board()
        .piece_on(from)
        .ok_or_else(|| ChessError::movement(format!("no piece on {}", &text[0..2])))?;

    Ok(MoveSpec::from_to(piece.kind, from, to, promotion))
}
