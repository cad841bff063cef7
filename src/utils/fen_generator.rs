use crate::game_state::chess_types::{CastleSide, Color};
use crate::game_state::game::Game;
use crate::utils::algebraic::{piece_to_char, square_to_algebraic};

/// FEN for the current position. Move clocks are not tracked and are
/// written as `0 1`.
pub fn generate_fen(game: &Game) -> String {
    let side_to_move = match game.side_to_move() {
        Color::White => "w",
        Color::Black => "b",
    };
    let en_passant = game
        .en_passant_target()
        .and_then(|square| square_to_algebraic(square).ok())
        .unwrap_or_else(|| "-".to_owned());

    format!(
        "{} {} {} {} 0 1",
        generate_board_field(game),
        side_to_move,
        generate_castling_field(game),
        en_passant
    )
}

fn generate_board_field(game: &Game) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match game.board().piece_on(rank * 8 + file) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    let ch = piece_to_char(piece.kind);
                    out.push(match piece.color {
                        Color::White => ch.to_ascii_uppercase(),
                        Color::Black => ch,
                    });
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(game: &Game) -> String {
    let rights = game.castling_rights();
    let mut out = String::new();
    for (color, side, ch) in [
        (Color::White, CastleSide::Kingside, 'K'),
        (Color::White, CastleSide::Queenside, 'Q'),
        (Color::Black, CastleSide::Kingside, 'k'),
        (Color::Black, CastleSide::Queenside, 'q'),
    ] {
        if rights.allows(color, side) {
            out.push(ch);
        }
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}
